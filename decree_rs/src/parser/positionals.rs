//! Argument binder: declared positionals bound left to right.

use std::collections::BTreeMap;

use crate::error::{Error, Result};
use crate::spec::ArgSpec;
use crate::token::TokenStream;

#[derive(Debug)]
pub(super) struct BoundArgs {
    /// Bound values by argument name, defaults included.
    pub(super) values: BTreeMap<String, String>,
    /// Positional tokens consumed from the stream. Defaults do not count,
    /// so this marks where leftover positionals begin.
    pub(super) consumed: usize,
}

pub(super) fn bind_args(specs: &[ArgSpec], tokens: &TokenStream) -> Result<BoundArgs> {
    let mut values = BTreeMap::new();
    let mut positionals = tokens.positionals();
    let mut consumed = 0;

    for spec in specs {
        let bound = match positionals.next() {
            Some(token) => {
                consumed += 1;
                Some(token.to_string())
            }
            None => match (&spec.default, spec.required) {
                (Some(default), _) => Some(default.clone()),
                (None, true) => {
                    return Err(Error::validation_for(
                        spec.name.clone(),
                        format!("missing required argument '{}'", spec.name),
                    ));
                }
                (None, false) => None,
            },
        };

        if let Some(value) = bound {
            if let Some(check) = &spec.validate {
                if let Err(message) = check(&value) {
                    let message = if message.is_empty() {
                        format!("invalid value for argument '{}'", spec.name)
                    } else {
                        message
                    };
                    return Err(Error::validation_for(spec.name.clone(), message));
                }
            }
            values.insert(spec.name.clone(), value);
        }
    }

    Ok(BoundArgs { values, consumed })
}
