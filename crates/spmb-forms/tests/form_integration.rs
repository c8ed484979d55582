//! Integration tests for the Builder -> Renderer -> State pipeline.
//!
//! A template is assembled with the builder, rendered through the default
//! registry, and filled in and validated through the form state.

use std::collections::HashMap;

use spmb_core::SpmbError;
use spmb_forms::builder::{FieldDraft, FormBuilder};
use spmb_forms::renderer::{RendererRegistry, WidgetKind};
use spmb_forms::schema::{FieldSchema, FieldType, FormTemplate};
use spmb_forms::state::FormState;
use spmb_forms::upload::FileHandle;
use spmb_forms::value::FieldValue;

const MIB: u64 = 1024 * 1024;

// ── Helpers ──────────────────────────────────────────────────────────

fn registration_builder() -> FormBuilder {
    let mut builder = FormBuilder::new(FormTemplate::new("1", "Form Pendaftaran SPMB 2025"));
    let drafts = [
        FieldDraft::new(FieldType::Text, "Nama Lengkap")
            .placeholder("Masukkan nama lengkap")
            .required(true),
        FieldDraft::new(FieldType::Phone, "Nomor Telepon").required(true),
        FieldDraft::new(FieldType::Select, "Jenis Kelamin")
            .options(["Laki-laki", "Perempuan"])
            .required(true),
        FieldDraft::new(FieldType::File, "Ijazah / SKL").required(true),
    ];
    for draft in drafts {
        builder.add_field(draft).unwrap();
    }
    builder
}

fn ids(template: &FormTemplate) -> Vec<String> {
    template.fields().iter().map(|f| f.id().to_string()).collect()
}

fn assert_dense(template: &FormTemplate) {
    let orders: Vec<u32> = template.fields().iter().map(FieldSchema::order).collect();
    let expected: Vec<u32> = (1..=u32::try_from(template.len()).unwrap()).collect();
    assert_eq!(orders, expected);
    template.validate_schema().unwrap();
}

// ── Ordering ─────────────────────────────────────────────────────────

#[test]
fn test_orders_stay_dense_across_mixed_operations() {
    let mut builder = FormBuilder::new(FormTemplate::new("t", "T"));
    // Deterministic pseudo-random walk over add, delete, and move.
    let mut seed: u64 = 0x5eed;
    for step in 0..200 {
        seed = seed.wrapping_mul(6_364_136_223_846_793_005).wrapping_add(1);
        let len = builder.template().len();
        let pick = usize::try_from(seed >> 33).unwrap();
        match pick % 3 {
            0 => {
                builder
                    .add_field(FieldDraft::new(FieldType::Text, format!("F{step}")))
                    .unwrap();
            }
            1 if len > 0 => {
                let id = builder.template().fields()[pick % len].id().to_string();
                builder.delete_field(&id).unwrap();
            }
            2 if len > 1 => {
                builder.move_field(pick % len, (pick / 7) % len).unwrap();
            }
            _ => {}
        }
        assert_dense(builder.template());
    }
}

#[test]
fn test_move_first_to_third() {
    let mut builder = registration_builder();
    let before = ids(builder.template());
    builder.move_field(0, 2).unwrap();
    let after = ids(builder.template());
    assert_eq!(
        after,
        vec![
            before[1].clone(),
            before[2].clone(),
            before[0].clone(),
            before[3].clone()
        ]
    );
    assert_dense(builder.template());
}

#[test]
fn test_delete_second_of_four() {
    let mut builder = registration_builder();
    let before = ids(builder.template());
    builder.delete_field(&before[1]).unwrap();
    assert_eq!(
        ids(builder.template()),
        vec![before[0].clone(), before[2].clone(), before[3].clone()]
    );
    assert_dense(builder.template());
}

#[test]
fn test_failed_add_leaves_template_untouched() {
    let mut builder = registration_builder();
    let before = builder.template().clone();
    let err = builder.add_field(FieldDraft::new(FieldType::Text, "")).unwrap_err();
    assert!(matches!(err, SpmbError::Validation(_)));
    assert_eq!(builder.template(), &before);
    assert_eq!(builder.template().len(), 4);
}

// ── Rendering ────────────────────────────────────────────────────────

#[test]
fn test_saved_template_round_trips_and_renders() {
    let template = registration_builder().finish().unwrap();
    let json = template.to_json_pretty().unwrap();
    let loaded = FormTemplate::from_json(&json).unwrap();
    assert_eq!(ids(&loaded), ids(&template));

    let specs = RendererRegistry::default()
        .render_template(&loaded, &HashMap::new())
        .unwrap();
    let widgets: Vec<WidgetKind> = specs.iter().map(|s| s.widget).collect();
    assert_eq!(
        widgets,
        vec![
            WidgetKind::TextInput,
            WidgetKind::TelInput,
            WidgetKind::Select,
            WidgetKind::FileInput
        ]
    );
    assert!(specs.iter().all(|s| s.required));
}

// ── Validation ───────────────────────────────────────────────────────

#[test]
fn test_single_required_text_field() {
    let template = FormTemplate::from_fields(
        "t",
        "T",
        vec![FieldSchema::new("nama", FieldType::Text, "Nama Lengkap").required(true)],
    );
    let mut state = FormState::new();
    assert!(!state.validate_all(&template));
    assert!(state.error("nama").is_some());

    state.set_value("nama", "x");
    assert!(state.validate_all(&template));
}

#[test]
fn test_file_limits() {
    let mut state = FormState::new();
    let too_big = FileHandle::new("scan.pdf", "application/pdf", 6 * MIB);
    assert!(state.set_file_value("ijazah", too_big).is_err());
    assert!(state.error("ijazah").is_some());
    assert!(state.value("ijazah").is_none());

    let ok = FileHandle::new("ijazah.pdf", "application/pdf", 3 * MIB);
    state.set_file_value("ijazah", ok.clone()).unwrap();
    assert!(state.error("ijazah").is_none());
    assert_eq!(state.value("ijazah"), Some(&FieldValue::File(ok)));
}

#[test]
fn test_full_submission_flow() {
    let template = registration_builder().finish().unwrap();
    let id = |label: &str| {
        template
            .fields()
            .iter()
            .find(|f| f.label == label)
            .map(|f| f.id().to_string())
            .unwrap()
    };

    let mut state = FormState::new();
    assert!(!state.validate_all(&template));
    assert_eq!(state.errors().len(), 4);

    state.set_value(id("Nama Lengkap"), "Ahmad Rizki Pratama");
    state.set_value(id("Nomor Telepon"), "081234567890");
    state.set_value(id("Jenis Kelamin"), "Laki-laki");
    state
        .set_file_value(id("Ijazah / SKL"), FileHandle::new("skl.png", "image/png", MIB))
        .unwrap();
    assert!(state.validate_all(&template));

    let values = state.values().clone();
    let specs = RendererRegistry::default()
        .render_template(&template, &values)
        .unwrap();
    assert!(specs[2].is_selected("Laki-laki"));

    let payload = state.payload(template.id());
    assert_eq!(payload.values.len(), 4);
}
