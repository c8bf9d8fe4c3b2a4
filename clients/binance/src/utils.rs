use hmac::{Hmac, Mac};
use sha2::Sha256;
use url::form_urlencoded;

type HmacSha256 = Hmac<Sha256>;

/// Milliseconds since the Unix epoch, as sent in the `timestamp` parameter.
pub fn timestamp_ms() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or_default()
}

/// Encode params as query string (URL-encoded) in insertion order. The signature must be computed over this string.
pub fn build_query<K, V>(params: &[(K, V)]) -> String
where
    K: AsRef<str>,
    V: AsRef<str>,
{
    let mut ser = form_urlencoded::Serializer::new(String::new());
    for (k, v) in params {
        ser.append_pair(k.as_ref(), v.as_ref());
    }
    ser.finish()
}

/// HMAC-SHA256(secret, query) -> lowercase hex.
pub fn sign_query(api_secret: &str, query: &str) -> String {
    let mut mac =
        HmacSha256::new_from_slice(api_secret.as_bytes()).expect("HMAC can take key of any size");
    mac.update(query.as_bytes());
    hex::encode(mac.finalize().into_bytes())
}

/// Append signature to params and return the full query string.
pub fn sign_params<K, V>(api_secret: &str, params: &[(K, V)]) -> String
where
    K: AsRef<str>,
    V: AsRef<str>,
{
    let query = build_query(params);
    let sig = sign_query(api_secret, &query);
    format!("{}&signature={}", query, sig)
}
