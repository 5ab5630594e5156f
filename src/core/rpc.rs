//! RPC envelope for the batchexecute endpoint

use serde_json::json;

/// RPC identifier of the translate call; also the marker token of its response line
pub const TRANSLATE_RPC_ID: &str = "MkEWBc";

/// Form field carrying the envelope
const FIELD_NAME: &str = "f.req";

/// Build the URL-encoded form body for one translation.
///
/// The parameter array is serialized on its own and embedded as a string
/// inside the outer envelope, so the endpoint sees JSON within JSON.
pub fn build_request_body(text: &str, src_lang: &str, dest_lang: &str) -> String {
    let parameter = json!([[text.trim(), src_lang, dest_lang, true], [1]]);
    let escaped_parameter = parameter.to_string();

    let rpc = json!([[[TRANSLATE_RPC_ID, escaped_parameter, null, "generic"]]]);
    let escaped_rpc = rpc.to_string();

    format!("{}={}&", FIELD_NAME, urlencoding::encode(&escaped_rpc))
}
