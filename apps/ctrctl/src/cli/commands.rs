//! # CLI Command Implementations
//!
//! This module contains the actual implementations of CLI commands.

use ctrctl::{
    builder::{bounded, build_report},
    config::Config,
    probe::{HttpProbe, ProbeGateway},
    render,
};
use ctrctl_core::{
    CapAction, CapabilityMask, CtrError, ProbeCall, SeccompMode, parse_effective,
    parse_seccomp_mode, parse_status, primitives::DEFAULT_CAPABILITIES, resolve_named,
};
use std::path::Path;

/// Maximum size of a process status file. Real ones are a few KB.
const MAX_STATUS_FILE_SIZE: u64 = 1024 * 1024;

fn probe_for(config: &Config) -> HttpProbe {
    HttpProbe::new(config.address.clone(), config.api_key.clone())
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<(), CtrError> {
    println!("{}", render::render_json(value)?);
    Ok(())
}

// =============================================================================
// INFO COMMAND
// =============================================================================

/// Display system-wide information.
pub async fn cmd_info(config: &Config, json_mode: bool) -> Result<(), CtrError> {
    let probe = probe_for(config);
    tracing::debug!("building status report from {}", probe.base_url());

    let report = build_report(&probe, config.client_info(), &config.build_options()).await?;

    if json_mode {
        return print_json(&report);
    }
    print!("{}", render::render_report(&report));
    Ok(())
}

// =============================================================================
// PLUGINS COMMAND
// =============================================================================

/// List daemon plugins with their load status.
pub async fn cmd_plugins(config: &Config, json_mode: bool) -> Result<(), CtrError> {
    let probe = probe_for(config);
    let plugins = bounded(ProbeCall::Plugins, config.timeout(), probe.plugins()).await?;

    if json_mode {
        return print_json(&plugins);
    }
    print!("{}", render::render_plugins(&plugins));
    Ok(())
}

// =============================================================================
// CAPS COMMANDS
// =============================================================================

/// Resolve add/drop directives into an effective mask.
pub fn cmd_caps_resolve(
    base: Option<&str>,
    all: Option<&str>,
    all_from: &Path,
    directives: &[(CapAction, String)],
    verbose: bool,
    json_mode: bool,
) -> Result<(), CtrError> {
    let base = match base {
        Some(hex) => parse_mask_arg("--base", hex)?,
        None => CapabilityMask::new(DEFAULT_CAPABILITIES),
    };
    let all_caps = match all {
        Some(hex) => parse_mask_arg("--all", hex)?,
        None => parse_effective(&read_status_file(all_from)?)?,
    };

    let named: Vec<(CapAction, &str)> = directives
        .iter()
        .map(|(action, name)| (*action, name.as_str()))
        .collect();
    let effective = resolve_named(base, &named, all_caps)?;

    tracing::debug!(
        base = %base,
        all_caps = %all_caps,
        directives = directives.len(),
        effective = %effective,
        "resolved capability mask"
    );

    if json_mode {
        return print_json(&serde_json::json!({
            "base": base.to_status_hex(),
            "all": all_caps.to_status_hex(),
            "effective": effective.to_status_hex(),
            "capabilities": effective.capabilities(),
            "reserved_bits": effective.reserved_bits(),
        }));
    }
    print!("{}", render::render_mask(effective, verbose));
    Ok(())
}

/// Show the capability sets and seccomp mode of a process.
pub fn cmd_caps_show(status_file: &Path, verbose: bool, json_mode: bool) -> Result<(), CtrError> {
    let text = read_status_file(status_file)?;
    let sets = parse_status(&text)?;
    let seccomp = parse_seccomp_mode(&text)?;

    if json_mode {
        let mut value =
            serde_json::to_value(sets).map_err(|e| CtrError::SerializationError(e.to_string()))?;
        if let Some(fields) = value.as_object_mut() {
            fields.insert("seccomp".to_string(), serde_json::json!(seccomp));
        }
        return print_json(&value);
    }
    print!("{}", render::render_sets(&sets, seccomp, verbose));
    Ok(())
}

/// Compare a process's effective capabilities and/or seccomp mode with
/// expected values.
///
/// Every mismatch is logged; the first one is returned.
pub fn cmd_caps_check(
    expect: Option<&str>,
    expect_seccomp: Option<SeccompMode>,
    status_file: &Path,
    json_mode: bool,
) -> Result<(), CtrError> {
    let text = read_status_file(status_file)?;
    let mut fields = serde_json::Map::new();
    let mut mismatches = Vec::new();

    if let Some(hex) = expect {
        let expected = parse_mask_arg("--expect", hex)?;
        let actual = parse_effective(&text)?;
        fields.insert("expected".to_string(), expected.to_status_hex().into());
        fields.insert("actual".to_string(), actual.to_status_hex().into());
        fields.insert("matches".to_string(), (expected == actual).into());

        if expected == actual {
            if !json_mode {
                println!("{} OK", actual.to_status_hex());
            }
        } else {
            let missing = CapabilityMask::new(expected.bits() & !actual.bits());
            let extra = CapabilityMask::new(actual.bits() & !expected.bits());
            for cap in missing.capabilities() {
                tracing::warn!("missing capability: {}", cap);
            }
            for cap in extra.capabilities() {
                tracing::warn!("unexpected capability: {}", cap);
            }
            mismatches.push(CtrError::CapabilityMismatch {
                expected: expected.bits(),
                actual: actual.bits(),
            });
        }
    }

    if let Some(expected) = expect_seccomp {
        let actual = parse_seccomp_mode(&text)?.ok_or_else(|| {
            CtrError::MalformedCapabilityStatus(format!(
                "'{}' has no Seccomp line",
                status_file.display()
            ))
        })?;
        fields.insert("expected_seccomp".to_string(), expected.number().into());
        fields.insert("actual_seccomp".to_string(), actual.number().into());
        fields.insert("seccomp_matches".to_string(), (expected == actual).into());

        if expected == actual {
            if !json_mode {
                println!("Seccomp {} ({}) OK", actual.number(), actual);
            }
        } else {
            tracing::warn!("seccomp mode is {}, expected {}", actual, expected);
            mismatches.push(CtrError::SeccompMismatch {
                expected: expected.number(),
                actual: actual.number(),
            });
        }
    }

    if json_mode {
        print_json(&fields)?;
    }

    match mismatches.into_iter().next() {
        Some(err) => Err(err),
        None => Ok(()),
    }
}

// =============================================================================
// HELPER FUNCTIONS
// =============================================================================

fn parse_mask_arg(flag: &str, hex: &str) -> Result<CapabilityMask, CtrError> {
    CapabilityMask::from_hex(hex).ok_or_else(|| {
        CtrError::ConfigError(format!("{} expects a hex bitmap, got {:?}", flag, hex))
    })
}

fn read_status_file(path: &Path) -> Result<String, CtrError> {
    let metadata = std::fs::metadata(path).map_err(|e| {
        CtrError::IoError(format!("Cannot read '{}': {}", path.display(), e))
    })?;

    // procfs files report a size of 0 and always pass.
    if metadata.is_file() && metadata.len() > MAX_STATUS_FILE_SIZE {
        return Err(CtrError::IoError(format!(
            "'{}' is {} bytes, larger than any process status file",
            path.display(),
            metadata.len()
        )));
    }

    std::fs::read_to_string(path)
        .map_err(|e| CtrError::IoError(format!("Read '{}': {}", path.display(), e)))
}

// =============================================================================
// TESTS
// =============================================================================
