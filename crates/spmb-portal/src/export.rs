//! CSV export of registrants.
//!
//! Fields containing the delimiter, a quote, or a line break are quoted and
//! embedded quotes are doubled.

use chrono::NaiveDate;

use spmb_core::{SpmbError, SpmbResult};

use crate::format::format_date_short;
use crate::models::Registration;

/// Header row of the export.
pub const CSV_HEADERS: [&str; 7] = [
    "Nomor Registrasi",
    "Nama Lengkap",
    "Email",
    "Nomor Telepon",
    "Gelombang",
    "Status",
    "Tanggal Daftar",
];

/// Returns `pendaftar-YYYY-MM-DD.csv` for `date`.
pub fn export_file_name(date: NaiveDate) -> String {
    format!("pendaftar-{}.csv", date.format("%Y-%m-%d"))
}

/// Writes `registrations` as CSV with a header row.
///
/// Rows are separated by `\n` and there is no trailing newline.
pub fn registrations_to_csv<'a, I>(registrations: I) -> SpmbResult<String>
where
    I: IntoIterator<Item = &'a Registration>,
{
    let mut writer = csv::WriterBuilder::new()
        .quote_style(csv::QuoteStyle::Necessary)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    writer.write_record(CSV_HEADERS).map_err(csv_error)?;
    for reg in registrations {
        let tanggal = format_date_short(reg.tanggal_daftar.date());
        writer
            .write_record([
                reg.nomor_registrasi.as_str(),
                reg.nama_lengkap.as_str(),
                reg.email.as_str(),
                reg.nomor_telepon.as_str(),
                reg.gelombang.as_str(),
                reg.status.label(),
                tanggal.as_str(),
            ])
            .map_err(csv_error)?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| SpmbError::SerializationError(e.to_string()))?;
    let mut text =
        String::from_utf8(bytes).map_err(|e| SpmbError::SerializationError(e.to_string()))?;
    if text.ends_with('\n') {
        text.pop();
    }
    Ok(text)
}

fn csv_error(err: csv::Error) -> SpmbError {
    SpmbError::SerializationError(err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RegistrationStatus;
    use chrono::NaiveDateTime;

    fn registration(nama: &str) -> Registration {
        Registration {
            id: "1".into(),
            nomor_registrasi: "SPMB-2025-001".into(),
            nama_lengkap: nama.into(),
            email: "ahmad.rizki@email.com".into(),
            nomor_telepon: "081234567890".into(),
            gelombang: "Gelombang 1".into(),
            status: RegistrationStatus::Verified,
            tanggal_daftar: NaiveDateTime::parse_from_str("2025-01-15T08:30:00", "%Y-%m-%dT%H:%M:%S")
                .unwrap(),
            form_data: serde_json::Map::new(),
            bukti_pembayaran: None,
        }
    }

    #[test]
    fn test_header_and_row() {
        let csv = registrations_to_csv([&registration("Ahmad Rizki Maulana")]).unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(
            lines[0],
            "Nomor Registrasi,Nama Lengkap,Email,Nomor Telepon,Gelombang,Status,Tanggal Daftar"
        );
        assert_eq!(
            lines[1],
            "SPMB-2025-001,Ahmad Rizki Maulana,ahmad.rizki@email.com,081234567890,Gelombang 1,Terverifikasi,15/01/2025"
        );
        assert!(!csv.ends_with('\n'));
    }

    #[test]
    fn test_quoting() {
        let csv = registrations_to_csv([&registration("Rizki, \"Iki\" Maulana")]).unwrap();
        assert!(csv.contains(r#"SPMB-2025-001,"Rizki, ""Iki"" Maulana",ahmad"#));
    }

    #[test]
    fn test_empty_export_has_header_only() {
        let csv = registrations_to_csv(std::iter::empty()).unwrap();
        assert_eq!(csv.lines().count(), 1);
    }

    #[test]
    fn test_file_name() {
        let date = NaiveDate::from_ymd_opt(2025, 1, 9).unwrap();
        assert_eq!(export_file_name(date), "pendaftar-2025-01-09.csv");
    }
}
