//! Decoding configuration files into generic data trees.
//!
//! Every format is decoded into `serde_json::Value` so templates stay
//! format-agnostic. JSON is always available; YAML and TOML decoders are
//! behind the `yaml` and `toml` features and report `Error::MissingExtras`
//! when compiled out.

use std::io::Read;
use std::path::Path;

use serde_json::Value;
use tracing::debug;

use crate::config::{DataFormat, LoadConfig};
use crate::error::Error;
#[cfg(any(feature = "yaml", feature = "toml"))]
use crate::tree::DataTree;

/// Decode `content` as `format`.
///
/// YAML input must hold a single document. NaN and infinite floats are
/// rejected since the data tree cannot represent them.
///
/// # Errors
///
/// Returns `Error::Decode` if the content is malformed, holds several YAML
/// documents or a non-finite float, or `Error::MissingExtras` if the
/// format's decoder is not compiled in.
pub fn load_str(content: &str, format: DataFormat) -> Result<Value, Error> {
    match format {
        DataFormat::Json => serde_json::from_str(content).map_err(|e| Error::Decode {
            format,
            message: e.to_string(),
        }),
        DataFormat::Yaml => decode_yaml(content),
        DataFormat::Toml => decode_toml(content),
    }
}

/// Read and decode a file. The format comes from `config.format` or the
/// file extension.
///
/// # Errors
///
/// Returns an error if the format is unknown or unavailable, the file cannot
/// be read, exceeds `config.max_file_size`, is not UTF-8, or fails to decode.
pub fn load_file(path: &Path, config: &LoadConfig) -> Result<Value, Error> {
    let format = config.format_for(path)?;
    // Fail before touching the file system when the decoder is compiled out.
    if let Some(feature) = format.feature()
        && !format.is_available()
    {
        return Err(Error::MissingExtras { format, feature });
    }

    let content = read_file_bounded(path, config.max_file_size)?;
    debug!(file = %path.display(), %format, bytes = content.len(), "decoding data file");
    load_str(&content, format)
}

/// Read a file with a bounded streaming read, enforcing `max_file_size`.
///
/// Reads at most `max_file_size + 1` bytes so oversized files are detected
/// without loading them whole.
fn read_file_bounded(path: &Path, max_file_size: u64) -> Result<String, Error> {
    let file = std::fs::File::open(path).map_err(|source| Error::Io {
        path: path.to_owned(),
        source,
    })?;

    let mut buffer = Vec::new();
    file.take(max_file_size.saturating_add(1))
        .read_to_end(&mut buffer)
        .map_err(|source| Error::Io {
            path: path.to_owned(),
            source,
        })?;

    if buffer.len() as u64 > max_file_size {
        return Err(Error::FileTooLarge {
            path: path.to_owned(),
            limit: max_file_size,
        });
    }

    String::from_utf8(buffer).map_err(|_| Error::InvalidEncoding {
        path: path.to_owned(),
    })
}

/// Only single-document streams are accepted; an empty stream decodes as null.
#[cfg(feature = "yaml")]
fn decode_yaml(content: &str) -> Result<Value, Error> {
    let decode_error = |message: String| Error::Decode {
        format: DataFormat::Yaml,
        message,
    };
    let mut documents = serde_saphyr::from_multiple::<DataTree>(content)
        .map_err(|e| decode_error(e.to_string()))?;
    match documents.len() {
        0 => Ok(Value::Null),
        1 => Ok(documents.swap_remove(0).0),
        count => Err(decode_error(format!(
            "found {count} documents; only single-document YAML files are supported"
        ))),
    }
}

#[cfg(not(feature = "yaml"))]
fn decode_yaml(_content: &str) -> Result<Value, Error> {
    Err(Error::MissingExtras {
        format: DataFormat::Yaml,
        feature: "yaml",
    })
}

/// TOML datetimes have no JSON counterpart and decode as single-key mappings.
#[cfg(feature = "toml")]
fn decode_toml(content: &str) -> Result<Value, Error> {
    toml::from_str::<DataTree>(content)
        .map(|tree| tree.0)
        .map_err(|e| Error::Decode {
            format: DataFormat::Toml,
            message: e.to_string(),
        })
}

#[cfg(not(feature = "toml"))]
fn decode_toml(_content: &str) -> Result<Value, Error> {
    Err(Error::MissingExtras {
        format: DataFormat::Toml,
        feature: "toml",
    })
}
