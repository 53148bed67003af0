mod common;

use std::fs;
use std::path::Path;

use common::{FxpBuilder, SYNTH_ID, SYNTH_VERSION};
use fxpreset_core::{
    FxpError, FxpPreset, InterfaceFamily, MemoryInstrument, PayloadKind, Preset, PresetError, PresetKind,
    load_preset_file, new_preset,
};
use tempfile::TempDir;

fn write(dir: &TempDir, name: &str, bytes: &[u8]) -> std::path::PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, bytes).unwrap();
    path
}

fn synth() -> MemoryInstrument {
    MemoryInstrument::new("Vital", SYNTH_ID, SYNTH_VERSION)
}

#[test]
fn load_replaces_display_name() {
    let temp = TempDir::new().unwrap();
    let path = write(&temp, "lead.fxp", &FxpBuilder::regular(&[0.5]).build());

    let mut preset = FxpPreset::new(&path);
    assert_eq!(preset.name(), path.display().to_string());
    preset.open().unwrap();
    preset.load(&mut synth()).unwrap();
    preset.free_extra_data();

    assert_eq!(preset.name(), "Init");
    assert!(!preset.is_open());
}

#[test]
fn failed_load_keeps_display_name() {
    let temp = TempDir::new().unwrap();
    let bytes = FxpBuilder::regular(&[0.5]).target_id(1).build();
    let path = write(&temp, "other.fxp", &bytes);

    let mut preset = FxpPreset::new(&path);
    preset.open().unwrap();
    let err = preset.load(&mut synth()).unwrap_err();
    preset.close();

    assert!(matches!(
        err,
        PresetError::Decode(FxpError::IncompatiblePreset { .. })
    ));
    assert_eq!(preset.name(), path.display().to_string());
}

#[test]
fn new_preset_selects_by_extension() {
    let preset = new_preset(Path::new("pads/warm.FxP")).unwrap();
    assert_eq!(preset.kind(), PresetKind::Fxp);

    let err = match new_preset(Path::new("pads/warm.vital")) {
        Ok(_) => panic!("expected unsupported format"),
        Err(err) => err,
    };
    assert!(matches!(err, PresetError::UnsupportedFormat { .. }));
}

#[test]
fn load_preset_file_reports_parameters() {
    let temp = TempDir::new().unwrap();
    let bytes = FxpBuilder::regular(&[0.0, 0.5, 1.0]).build();
    let path = write(&temp, "init.fxp", &bytes);

    let mut instrument = synth();
    let report = load_preset_file(&path, &mut instrument).unwrap();

    assert_eq!(report.input.bytes, bytes.len() as u64);
    assert_eq!(report.preset.payload, PayloadKind::Regular);
    assert_eq!(report.preset.target_id_fourcc, "Vita");
    assert_eq!(report.parameters, Some(vec![0.0, 0.5, 1.0]));
    assert!(report.chunk_size.is_none());
    assert!(report.warnings.is_empty());
    assert_eq!(instrument.parameters(), &[0.0, 0.5, 1.0]);
}

#[test]
fn load_preset_file_reports_chunk_and_warning() {
    let temp = TempDir::new().unwrap();
    let bytes = FxpBuilder::chunk(b"<vital/>").target_version(3).build();
    let path = write(&temp, "patch.fxp", &bytes);

    let mut instrument = synth();
    let report = load_preset_file(&path, &mut instrument).unwrap();

    assert_eq!(report.chunk_size, Some(8));
    assert!(report.parameters.is_none());
    assert_eq!(report.warnings.len(), 1);
    assert_eq!(instrument.chunk(), Some(&b"<vital/>"[..]));

    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["preset"]["payload"], "opaque_chunk");
}

#[test]
fn load_preset_file_missing_input() {
    let temp = TempDir::new().unwrap();
    let err = load_preset_file(&temp.path().join("missing.fxp"), &mut synth()).unwrap_err();
    assert!(matches!(err, PresetError::Open { .. }));
    assert!(err.to_string().contains("could not be opened"));
}

#[test]
fn load_preset_file_rejects_undeclared_family() {
    let temp = TempDir::new().unwrap();
    let path = write(&temp, "lead.fxp", &FxpBuilder::regular(&[0.5]).build());

    let mut instrument = synth().with_family(InterfaceFamily::Other);
    let err = load_preset_file(&path, &mut instrument).unwrap_err();

    assert!(matches!(
        err,
        PresetError::IncompatibleFamily {
            family: InterfaceFamily::Other
        }
    ));
    assert!(instrument.parameters().is_empty());
    assert!(instrument.chunk().is_none());
}

#[test]
fn preset_load_checks_family_before_decoding() {
    let temp = TempDir::new().unwrap();
    let path = write(&temp, "pad.fxp", &FxpBuilder::chunk(&[1, 2, 3]).build());

    let mut preset = FxpPreset::new(&path);
    preset.open().unwrap();
    let mut instrument = synth().with_family(InterfaceFamily::Other);
    let err = preset.load(&mut instrument).unwrap_err();
    preset.close();

    assert!(matches!(err, PresetError::IncompatibleFamily { .. }));
    assert!(instrument.chunk().is_none());
    assert_eq!(preset.name(), path.display().to_string());
}
