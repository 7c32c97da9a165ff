//! The name-resolution cascade every adaptive dispatcher runs at call time.
//!
//! Rust has no runtime source generation, so "synthesizing a dispatcher" in
//! this workspace means something more modest and more static: a capability
//! author hand-writes one small `struct` implementing the capability,
//! registers it as `Role::Adaptive` the same way any other extension
//! registers, and its method bodies call [`resolve_extension_name`] to do
//! the URL-reading cascade instead of reimplementing it per capability —
//! the dispatcher is generated once, by hand, at the time the crate is
//! written, rather than compiled from source text at runtime.

use spi_ext_core::markers::AdaptiveKeys;
use spi_ext_core::url::UrlLike;
use tracing::warn;

use crate::err::{Result, SynthesisError};

/// Runs the lookup cascade for one adaptive method and returns the
/// resolved extension name, or [`SynthesisError::IllegalState`] if every
/// key (and the SPI default) came back empty.
///
/// `keys.keys` is tried right-to-left: the rightmost key's lookup supplies
/// the default for the key to its left, and so on, with `spi_default`
/// seeding the innermost default. An empty `keys.keys` derives a single key
/// from `capability_simple_name` by splitting it at uppercase boundaries.
///
/// `method_name` is `Some` when the adaptive method carries a framework
/// invocation argument (`keys.uses_invocation_method`); lookups then prefer
/// `url.method_parameter(method, key, default)` over the plain parameter.
pub fn resolve_extension_name(
    url: &dyn UrlLike,
    keys: AdaptiveKeys,
    capability: &'static str,
    capability_simple_name: &str,
    method_name: &'static str,
    spi_default: Option<&'static str>,
) -> Result<String> {
    let derived_key;
    let owned_chain;
    let chain: &[&str] = if keys.keys.is_empty() {
        derived_key = spi_ext_core::utils::derive_adaptive_key(capability_simple_name);
        owned_chain = [derived_key.as_str()];
        &owned_chain
    } else {
        keys.keys
    };

    let mut current_default = spi_default.unwrap_or("").to_string();
    for &key in chain.iter().rev() {
        current_default = resolve_one_key(url, key, &current_default, keys.uses_invocation_method, method_name);
    }

    if current_default.is_empty() {
        let url_debug = format!("{:?}", url.parameters());
        warn!(capability, method = method_name, url = %url_debug, "adaptive dispatch resolved an empty extension name");
        return Err(SynthesisError::IllegalState {
            capability,
            method: method_name,
            url_debug,
        });
    }

    Ok(current_default)
}

fn resolve_one_key(url: &dyn UrlLike, key: &str, default: &str, uses_invocation_method: bool, method_name: &str) -> String {
    if key == "protocol" {
        return match url.protocol() {
            Some(value) if !value.is_empty() => value,
            _ => default.to_string(),
        };
    }
    if uses_invocation_method {
        url.method_parameter_or(method_name, key, default)
    } else {
        url.parameter_or(key, default)
    }
}

/// Unwraps an optional URL argument, raising [`SynthesisError::IllegalArgument`]
/// when it's absent at call time.
pub fn require_url<'a>(
    url: Option<&'a dyn UrlLike>,
    capability: &'static str,
    method_name: &'static str,
) -> Result<&'a dyn UrlLike> {
    url.ok_or_else(|| {
        warn!(capability, method = method_name, "adaptive method invoked with no URL source reachable");
        SynthesisError::IllegalArgument {
            capability,
            method: method_name,
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use spi_ext_core::url::SimpleUrl;

    #[test]
    fn empty_keys_derive_from_capability_name() {
        let url = SimpleUrl::new().with_param("load.balance", "random");
        let resolved = resolve_extension_name(
            &url,
            AdaptiveKeys::DERIVE,
            "dyn LoadBalance",
            "LoadBalance",
            "select",
            None,
        )
        .unwrap();
        assert_eq!(resolved, "random");
    }

    #[test]
    fn chained_keys_fall_back_right_to_left() {
        let url = SimpleUrl::new().with_param("transporter", "mina");
        let resolved = resolve_extension_name(
            &url,
            AdaptiveKeys::keyed(&["client", "transporter"]),
            "dyn Transporter",
            "Transporter",
            "connect",
            Some("netty"),
        )
        .unwrap();
        assert_eq!(resolved, "mina");

        let url = SimpleUrl::new().with_param("client", "grizzly").with_param("transporter", "mina");
        let resolved = resolve_extension_name(
            &url,
            AdaptiveKeys::keyed(&["client", "transporter"]),
            "dyn Transporter",
            "Transporter",
            "connect",
            Some("netty"),
        )
        .unwrap();
        assert_eq!(resolved, "grizzly");
    }

    #[test]
    fn empty_url_falls_back_to_spi_default() {
        let url = SimpleUrl::new();
        let resolved = resolve_extension_name(
            &url,
            AdaptiveKeys::keyed(&["client", "transporter"]),
            "dyn Transporter",
            "Transporter",
            "connect",
            Some("netty"),
        )
        .unwrap();
        assert_eq!(resolved, "netty");
    }

    #[test]
    fn protocol_key_reads_the_protocol_not_a_parameter() {
        let url = SimpleUrl::new().with_protocol("dubbo").with_param("protocol", "ignored");
        let resolved =
            resolve_extension_name(&url, AdaptiveKeys::keyed(&["protocol"]), "dyn Protocol", "Protocol", "connect", Some("fallback"))
                .unwrap();
        assert_eq!(resolved, "dubbo");
    }

    #[test]
    fn protocol_key_falls_back_when_protocol_is_absent() {
        let url = SimpleUrl::new();
        let resolved =
            resolve_extension_name(&url, AdaptiveKeys::keyed(&["protocol"]), "dyn Protocol", "Protocol", "connect", Some("fallback"))
                .unwrap();
        assert_eq!(resolved, "fallback");
    }

    #[test]
    fn empty_resolution_is_illegal_state() {
        let url = SimpleUrl::new();
        let err = resolve_extension_name(&url, AdaptiveKeys::keyed(&["client"]), "dyn Transporter", "Transporter", "connect", None)
            .unwrap_err();
        assert!(matches!(err, SynthesisError::IllegalState { .. }));
    }

    #[test]
    fn method_scoped_lookup_prefers_the_per_method_key() {
        let url = SimpleUrl::new().with_param("timeout", "1000").with_param("timeout.connect", "500");
        let resolved = resolve_extension_name(
            &url,
            AdaptiveKeys::keyed_by_method(&["timeout"]),
            "dyn Transporter",
            "Transporter",
            "connect",
            None,
        )
        .unwrap();
        assert_eq!(resolved, "500");
    }

    #[test]
    fn require_url_rejects_none() {
        let err = require_url(None, "dyn Transporter", "connect").unwrap_err();
        assert!(matches!(err, SynthesisError::IllegalArgument { .. }));
    }

    #[test]
    fn require_url_accepts_some() {
        let url = SimpleUrl::new();
        assert!(require_url(Some(&url), "dyn Transporter", "connect").is_ok());
    }

    proptest::proptest! {
        /// Whichever single key in the chain carries a non-empty value, the
        /// cascade resolves to it, regardless of how many empty keys
        /// surround it or where in the chain it sits.
        #[test]
        fn cascade_resolves_to_the_sole_populated_key(
            before in proptest::collection::vec("[a-z]{2,6}", 0..3),
            populated in "[a-z]{2,6}",
            after in proptest::collection::vec("[a-z]{2,6}", 0..3),
            value in "[a-z0-9]{1,8}",
        ) {
            let mut owned_keys: Vec<String> = before.clone();
            owned_keys.push(populated.clone());
            owned_keys.extend(after.clone());
            let keys: Vec<&str> = owned_keys.iter().map(String::as_str).collect();
            let leaked_keys: &'static [&'static str] = Box::leak(
                keys.into_iter().map(|k| -> &'static str { Box::leak(k.to_string().into_boxed_str()) }).collect::<Vec<_>>().into_boxed_slice(),
            );

            let url = SimpleUrl::new().with_param(&populated, &value);
            let resolved = resolve_extension_name(
                &url,
                AdaptiveKeys::keyed(leaked_keys),
                "dyn Transporter",
                "Transporter",
                "connect",
                None,
            )
            .unwrap();
            prop_assert_eq!(resolved, value);
        }
    }
}
