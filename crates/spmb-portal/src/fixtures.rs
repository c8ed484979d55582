//! Seed data for a fresh portal: five applicants, the default registration
//! template, two waves, and their payment schemes.

use chrono::{NaiveDate, NaiveDateTime};
use serde_json::json;

use spmb_forms::{FieldSchema, FieldType, FormTemplate};

use crate::models::{Gelombang, PaymentScheme, Registration, RegistrationStatus};

fn at(date: (i32, u32, u32), time: (u32, u32)) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(date.0, date.1, date.2)
        .and_then(|d| d.and_hms_opt(time.0, time.1, 0))
        .unwrap_or_default()
}

fn day(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default()
}

struct Applicant {
    nama: &'static str,
    email: &'static str,
    telepon: &'static str,
    status: RegistrationStatus,
    daftar: NaiveDateTime,
    lahir: &'static str,
    kelamin: &'static str,
    alamat: &'static str,
    sekolah: &'static str,
}

/// The seeded applicants, numbered `SPMB-2025-001` through `-005`.
pub fn registrations() -> Vec<Registration> {
    let applicants = [
        Applicant {
            nama: "Ahmad Rizki Maulana",
            email: "ahmad.rizki@email.com",
            telepon: "081234567890",
            status: RegistrationStatus::Verified,
            daftar: at((2025, 1, 15), (8, 30)),
            lahir: "2008-05-12",
            kelamin: "Laki-laki",
            alamat: "Jl. Merdeka No. 123, Bandung",
            sekolah: "SMP Negeri 1 Bandung",
        },
        Applicant {
            nama: "Siti Nurhaliza",
            email: "siti.nurhaliza@email.com",
            telepon: "082345678901",
            status: RegistrationStatus::Pending,
            daftar: at((2025, 1, 16), (9, 15)),
            lahir: "2008-08-20",
            kelamin: "Perempuan",
            alamat: "Jl. Sudirman No. 45, Bandung",
            sekolah: "SMP Negeri 3 Bandung",
        },
        Applicant {
            nama: "Budi Santoso",
            email: "budi.santoso@email.com",
            telepon: "083456789012",
            status: RegistrationStatus::Verified,
            daftar: at((2025, 1, 17), (10, 20)),
            lahir: "2008-03-15",
            kelamin: "Laki-laki",
            alamat: "Jl. Asia Afrika No. 67, Bandung",
            sekolah: "SMP Negeri 5 Bandung",
        },
        Applicant {
            nama: "Dewi Lestari",
            email: "dewi.lestari@email.com",
            telepon: "084567890123",
            status: RegistrationStatus::Pending,
            daftar: at((2025, 1, 18), (11, 30)),
            lahir: "2008-11-08",
            kelamin: "Perempuan",
            alamat: "Jl. Braga No. 89, Bandung",
            sekolah: "SMP Negeri 2 Bandung",
        },
        Applicant {
            nama: "Eko Prasetyo",
            email: "eko.prasetyo@email.com",
            telepon: "085678901234",
            status: RegistrationStatus::Rejected,
            daftar: at((2025, 1, 19), (13, 45)),
            lahir: "2008-07-22",
            kelamin: "Laki-laki",
            alamat: "Jl. Dago No. 12, Bandung",
            sekolah: "SMP Negeri 4 Bandung",
        },
    ];

    applicants
        .into_iter()
        .enumerate()
        .map(|(i, a)| {
            let n = i + 1;
            let form_data = json!({
                "tanggalLahir": a.lahir,
                "jenisKelamin": a.kelamin,
                "alamat": a.alamat,
                "asalSekolah": a.sekolah,
            });
            Registration {
                id: n.to_string(),
                nomor_registrasi: format!("SPMB-2025-{n:03}"),
                nama_lengkap: a.nama.to_string(),
                email: a.email.to_string(),
                nomor_telepon: a.telepon.to_string(),
                gelombang: "Gelombang 1".to_string(),
                status: a.status,
                tanggal_daftar: a.daftar,
                form_data: form_data.as_object().cloned().unwrap_or_default(),
                bukti_pembayaran: None,
            }
        })
        .collect()
}

/// The default, active registration template with fields `f1` to `f8`.
pub fn form_template() -> FormTemplate {
    let mut template = FormTemplate::from_fields(
        "1",
        "Form Pendaftaran SPMB 2025",
        vec![
            FieldSchema::new("f1", FieldType::Text, "Nama Lengkap")
                .placeholder("Masukkan nama lengkap sesuai akta kelahiran")
                .required(true),
            FieldSchema::new("f2", FieldType::Phone, "Nomor Telepon")
                .placeholder("08xxxxxxxxxx")
                .required(true),
            FieldSchema::new("f3", FieldType::Text, "Email")
                .placeholder("email@example.com")
                .required(true),
            FieldSchema::new("f4", FieldType::Date, "Tanggal Lahir").required(true),
            FieldSchema::new("f5", FieldType::Select, "Jenis Kelamin")
                .options(["Laki-laki", "Perempuan"])
                .required(true),
            FieldSchema::new("f6", FieldType::Textarea, "Alamat Lengkap")
                .placeholder("Masukkan alamat lengkap sesuai KTP")
                .required(true),
            FieldSchema::new("f7", FieldType::Text, "Asal Sekolah")
                .placeholder("Nama sekolah SMP/MTs")
                .required(true),
            FieldSchema::new("f8", FieldType::File, "Upload Foto").required(true),
        ],
    );
    template.is_active = true;
    let created = at((2025, 1, 1), (0, 0));
    template.set_timestamps(created, created);
    template
}

/// Two registration waves; the first is active.
pub fn gelombang() -> Vec<Gelombang> {
    vec![
        Gelombang {
            id: "1".to_string(),
            nama: "Gelombang 1".to_string(),
            tanggal_mulai: day(2025, 1, 1),
            tanggal_selesai: day(2025, 3, 31),
            kuota: 100,
            biaya_pendaftaran: 250_000,
            is_active: true,
        },
        Gelombang {
            id: "2".to_string(),
            nama: "Gelombang 2".to_string(),
            tanggal_mulai: day(2025, 4, 1),
            tanggal_selesai: day(2025, 6, 30),
            kuota: 100,
            biaya_pendaftaran: 300_000,
            is_active: false,
        },
    ]
}

/// One payment scheme per wave; the first is active.
pub fn payment_schemes() -> Vec<PaymentScheme> {
    [(1, 250_000, true), (2, 300_000, false)]
        .into_iter()
        .map(|(n, jumlah, is_active)| PaymentScheme {
            id: n.to_string(),
            nama: format!("Biaya Pendaftaran Gelombang {n}"),
            jumlah,
            keterangan: format!("Biaya pendaftaran untuk gelombang {n}"),
            is_active,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_registrations() {
        let regs = registrations();
        assert_eq!(regs.len(), 5);
        assert_eq!(regs[4].nomor_registrasi, "SPMB-2025-005");
        assert_eq!(regs[0].form_data["asalSekolah"], "SMP Negeri 1 Bandung");
        assert_eq!(regs[1].tanggal_daftar.to_string(), "2025-01-16 09:15:00");
    }

    #[test]
    fn test_seed_template_is_valid() {
        let template = form_template();
        template.validate_schema().unwrap();
        assert_eq!(template.len(), 8);
        assert!(template.is_active);
        assert_eq!(template.field("f8").unwrap().field_type, FieldType::File);
    }

    #[test]
    fn test_seed_waves_and_schemes() {
        assert_eq!(gelombang().iter().filter(|g| g.is_active).count(), 1);
        let schemes = payment_schemes();
        assert_eq!(schemes[1].nama, "Biaya Pendaftaran Gelombang 2");
        assert_eq!(schemes[0].jumlah, 250_000);
    }
}
