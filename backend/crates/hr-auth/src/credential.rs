/// Pick the subscription credential from the request.
///
/// The `Authorization` header wins over the `token` query parameter. Both a
/// raw token and the `Bearer <token>` form are accepted. Blank values count
/// as absent.
pub fn extract_credential<'a>(
    authorization: Option<&'a str>,
    query_token: Option<&'a str>,
) -> Option<&'a str> {
    let from_header = authorization
        .map(|value| value.strip_prefix("Bearer ").unwrap_or(value).trim())
        .filter(|token| !token.is_empty());

    from_header.or_else(|| query_token.map(str::trim).filter(|token| !token.is_empty()))
}
