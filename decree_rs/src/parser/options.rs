//! Option resolver: one declared option against the token stream.

use crate::error::{Error, Result};
use crate::parsed::OptionValue;
use crate::spec::{OptionSpec, ValueKind};
use crate::token::TokenStream;

/// Resolve a single option. `Ok(None)` means legitimately absent: no token,
/// no default, not required.
///
/// Token forms are probed primary flag first, then each alias in declared
/// order; the first form present in argv wins regardless of position.
pub(super) fn resolve_option(
    spec: &OptionSpec,
    tokens: &TokenStream,
) -> Result<Option<OptionValue>> {
    let hit = std::iter::once(&spec.flag)
        .chain(spec.aliases.iter())
        .find_map(|form| tokens.find_flag(form));

    let value = match hit {
        Some(found) => Some(coerce(spec, found.value)?),
        None => match (&spec.default, spec.required) {
            (Some(default), _) => Some(default.clone()),
            (None, true) => {
                return Err(Error::validation_for(
                    spec.name.clone(),
                    format!("missing required option {}", spec.flag),
                ));
            }
            (None, false) => None,
        },
    };

    if let (Some(resolved), Some(check)) = (&value, &spec.validate) {
        if let Err(message) = check(resolved) {
            let message = if message.is_empty() {
                format!("invalid value for {}", spec.flag)
            } else {
                message
            };
            return Err(Error::validation_for(spec.name.clone(), message));
        }
    }

    Ok(value)
}

/// Coerce raw token text to the declared kind.
///
/// Booleans read bare presence as `true` and accept only a literal inline
/// `true`/`false`; anything else is a validation failure, not a silent
/// fallback.
fn coerce(spec: &OptionSpec, raw: Option<&str>) -> Result<OptionValue> {
    match spec.kind {
        ValueKind::Bool => match raw {
            None | Some("true") => Ok(OptionValue::Bool(true)),
            Some("false") => Ok(OptionValue::Bool(false)),
            Some(other) => Err(Error::validation_for(
                spec.name.clone(),
                format!("{} expects true or false, got '{other}'", spec.flag),
            )),
        },
        ValueKind::Number => {
            let raw = raw.ok_or_else(|| requires_value(spec))?;
            raw.parse::<f64>().map(OptionValue::Number).map_err(|_| {
                Error::validation_for(
                    spec.name.clone(),
                    format!("{} expects a number, got '{raw}'", spec.flag),
                )
            })
        }
        ValueKind::Text => {
            let raw = raw.ok_or_else(|| requires_value(spec))?;
            Ok(OptionValue::Text(raw.to_string()))
        }
    }
}

fn requires_value(spec: &OptionSpec) -> Error {
    Error::validation_for(
        spec.name.clone(),
        format!("{} requires a value", spec.flag),
    )
}
