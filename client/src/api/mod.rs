//! Typed endpoint surface over the gateway.
//!
//! One module per entity of the practice-management API, each carrying the
//! serde wire models and thin call wrappers. The upstream mixes snake and
//! camel case field names; the models mirror the wire exactly.

pub mod appointments;
pub mod calendar;
pub mod clients;
pub mod invoices;
pub mod leads;
pub mod payments;
pub mod services;

use serde::{Deserialize, Serialize};
use url::form_urlencoded;

/// How a lead or client prefers to be contacted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContactPreference {
    Email,
    Phone,
    Sms,
}

/// Builds `?key=value&...` from the present parameters; empty when none are.
pub(crate) fn query_string<'a>(
    pairs: impl IntoIterator<Item = (&'a str, Option<String>)>,
) -> String {
    let mut serializer = form_urlencoded::Serializer::new(String::new());
    let mut any = false;
    for (key, value) in pairs {
        if let Some(value) = value {
            serializer.append_pair(key, &value);
            any = true;
        }
    }
    if any {
        format!("?{}", serializer.finish())
    } else {
        String::new()
    }
}
