use mhc_icc::{HeaderField, ProfileHeader};

use super::SpecParseError;

/// Header edits in the form `key=value[,key=value...]`.
///
/// Segments without `=` continue the previous value, so `illuminant=0.9642,1,0.8249` keeps
/// its commas.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderSpec(pub Vec<(HeaderField, String)>);

impl HeaderSpec {
    /// Applies the edits as human readable text.
    pub fn apply(&self, header: &mut ProfileHeader) -> mhc_icc::Result<()> {
        for (field, value) in &self.0 {
            tracing::debug!(field = field.key(), value, "Setting header field");
            header.set_field(*field, value)?;
        }
        Ok(())
    }

    /// Applies the edits as raw hex.
    pub fn apply_hex(&self, header: &mut ProfileHeader) -> mhc_icc::Result<()> {
        for (field, value) in &self.0 {
            tracing::debug!(field = field.key(), value, "Setting header field from hex");
            header.set_field_hex(*field, value)?;
        }
        Ok(())
    }
}

pub fn parse_header_spec(val: &str) -> Result<HeaderSpec, SpecParseError> {
    let mut edits: Vec<(HeaderField, String)> = Vec::new();
    for segment in val.split(',') {
        match segment.split_once('=') {
            Some((key, value)) => {
                let field = key.trim().parse::<HeaderField>()?;
                edits.push((field, value.trim().to_owned()));
            }
            None => {
                let Some((_, value)) = edits.last_mut() else {
                    return Err(format!("`{segment}` is not a parameter spec").into());
                };
                value.push(',');
                value.push_str(segment.trim());
            }
        }
    }
    if edits.is_empty() {
        return Err("parameters are required".into());
    }
    Ok(HeaderSpec(edits))
}
