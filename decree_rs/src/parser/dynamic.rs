//! Dynamic capture: a second pass over the token stream that collects
//! everything no declared spec claimed.

use std::collections::BTreeMap;

use crate::parsed::OptionValue;
use crate::spec::{CommandSpec, OptionSpec};
use crate::token::TokenStream;

/// Collect leftovers for commands that opted in.
///
/// Leftover positionals are whatever the binder did not consume, verbatim
/// and in argv order. Leftover option tokens are those matching no merged
/// spec: bare flags become `true`, inline values stay text. Repeated flags
/// keep the last value, like repeated keys in an object literal.
pub(super) fn capture(
    spec: &CommandSpec,
    options: &[OptionSpec],
    tokens: &TokenStream,
    consumed: usize,
) -> (Option<Vec<String>>, Option<BTreeMap<String, OptionValue>>) {
    let dynamic_args = spec.allow_dynamic_args.then(|| {
        tokens
            .positionals()
            .skip(consumed)
            .map(str::to_string)
            .collect()
    });

    let dynamic_options = spec.allow_dynamic_options.then(|| {
        let mut captured = BTreeMap::new();
        for (flag, value) in tokens.option_tokens() {
            if options.iter().any(|opt| opt.matches(flag)) {
                continue;
            }
            let value = match value {
                Some(text) => OptionValue::Text(text.to_string()),
                None => OptionValue::Bool(true),
            };
            captured.insert(strip_dashes(flag).to_string(), value);
        }
        captured
    });

    (dynamic_args, dynamic_options)
}

/// Map key for a captured flag. `--tag` and `-tag` both land under `tag`;
/// a token of only dashes keeps its raw form rather than an empty key.
fn strip_dashes(flag: &str) -> &str {
    let stripped = flag.trim_start_matches('-');
    if stripped.is_empty() { flag } else { stripped }
}
