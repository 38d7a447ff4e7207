use crate::error::{DriverError, DriverResult};

/// Normalise a MySQL DSN into a `mysql://` URL.
///
/// Accepts URLs unchanged and also the `user:password@tcp(host:port)/dbname`
/// form, optionally followed by `?params`.
pub fn mysql_url(dsn: &str) -> DriverResult<String> {
    let dsn = dsn.trim();
    if dsn.starts_with("mysql://") {
        return Ok(dsn.to_string());
    }

    let invalid = || DriverError::InvalidDsn(dsn.to_string());

    let (credentials, rest) = match dsn.rsplit_once('@') {
        Some((creds, rest)) => (Some(creds), rest),
        None => (None, dsn),
    };
    let (address, tail) = rest.split_once('/').ok_or_else(invalid)?;

    let host = if address.is_empty() {
        "localhost:3306"
    } else if let Some(inner) = address
        .strip_prefix("tcp(")
        .and_then(|a| a.strip_suffix(')'))
    {
        inner
    } else if address.contains('(') {
        // unix(...) sockets and other protocols are not supported
        return Err(invalid());
    } else {
        address
    };

    let (dbname, params) = match tail.split_once('?') {
        Some((db, params)) => (db, Some(params)),
        None => (tail, None),
    };

    let mut url = String::from("mysql://");
    if let Some(credentials) = credentials {
        url.push_str(credentials);
        url.push('@');
    }
    url.push_str(host);
    url.push('/');
    url.push_str(dbname);
    if let Some(params) = params {
        url.push('?');
        url.push_str(params);
    }
    Ok(url)
}
