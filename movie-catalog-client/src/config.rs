/// Base URL of the catalog backend. Set `CATALOG_API_URL` at build time to point the client at
/// another host.
pub const API_URL: &str = match option_env!("CATALOG_API_URL") {
    Some(url) => url,
    None => "http://localhost:4000",
};
