#![forbid(unsafe_code)]

use path_absolutize::Absolutize;
use std::ops::Deref;
use std::path::Path;

use poem::Request;

use log::{debug, LevelFilter};

use crate::utils::errors::Errors;

// ***************************************************************************
// GENERAL PUBLIC FUNCTIONS
// ***************************************************************************
// ---------------------------------------------------------------------------
// get_absolute_path:
// ---------------------------------------------------------------------------
/** Replace tilde (~) and environment variable values in a path name and
 * then construct the absolute path name.  Unlike canonicalize, absolutize
 * does not care whether the file exists.  On any failure the original path
 * is returned unchanged.
 */
pub fn get_absolute_path(path: &str) -> String {
    // Replace ~ and environment variable values if possible.
    let s = match shellexpand::full(path) {
        Ok(x) => x,
        Err(_) => return path.to_owned(),
    };

    // Convert to absolute path if necessary.
    let p = Path::new(s.deref());
    let p1 = match p.absolutize() {
        Ok(x) => x,
        Err(_) => return path.to_owned(),
    };
    let p2 = match p1.to_str() {
        Some(x) => x,
        None => return path.to_owned(),
    };

    p2.to_owned()
}

// ***************************************************************************
//                           Request Accessors
// ***************************************************************************
// ---------------------------------------------------------------------------
// required_header:
// ---------------------------------------------------------------------------
/** Return the value of the named header or an error if the header was not
 * sent.  A header that is present never fails: bytes that aren't valid UTF-8
 * are replaced rather than rejected.  Header names are matched without
 * regard to case.  When a header is repeated the first value is used.
 */
pub fn required_header(http_req: &Request, name: &str) -> Result<String, Errors> {
    match http_req.headers().get(name) {
        Some(v) => Ok(String::from_utf8_lossy(v.as_bytes()).into_owned()),
        None => Err(Errors::MissingHeader(name.to_string())),
    }
}

// ---------------------------------------------------------------------------
// remote_ip:
// ---------------------------------------------------------------------------
/** Return the caller's IP address without the port.  Peers that are not
 * socket addresses (unix sockets, test clients) are rendered the way the
 * framework displays them.
 */
pub fn remote_ip(http_req: &Request) -> String {
    let remote = http_req.remote_addr();
    match remote.as_socket_addr() {
        Some(addr) => addr.ip().to_string(),
        None => remote.to_string(),
    }
}

// ---------------------------------------------------------------------------
// request_from_peer:
// ---------------------------------------------------------------------------
/** Build a request as the listener would for a connection from the peer. */
#[cfg(test)]
pub fn request_from_peer(http_req: poem::http::Request<()>, peer: &str) -> Request {
    use poem::web::{LocalAddr, RemoteAddr};
    use poem::{Addr, Body, RequestParts};

    let peer = peer.parse().expect("test peer must be a socket address");
    let (parts, _) = http_req.into_parts();
    let parts = RequestParts::from((parts, LocalAddr::default(),
                                    RemoteAddr(Addr::SocketAddr(peer)),
                                    poem::http::uri::Scheme::HTTP));
    Request::from_parts(parts, Body::empty())
}

// ---------------------------------------------------------------------------
// client_info:
// ---------------------------------------------------------------------------
/** Describe the client request for diagnostic display.  Only header names
 * are listed; header values and the peer address are left to the caller.
 */
pub fn client_info(http_req: &Request) -> String {
    let mut names: Vec<&str> = http_req.headers().keys().map(|k| k.as_str()).collect();
    names.sort_unstable();
    names.dedup();

    let mut s = String::with_capacity(255);
    s.push_str("Method : ");
    s.push_str(http_req.method().as_str());
    s.push_str("<br> Path : ");
    s.push_str(http_req.uri().path());
    s.push_str("<br> Protocol : ");
    s.push_str(&format!("{:?}", http_req.version()));
    s.push_str("<br> Scheme : ");
    s.push_str(&http_req.scheme().to_string());
    s.push_str("<br> Headers : ");
    s.push_str(&names.join(", "));
    s
}

// ***************************************************************************
//                                  Traits
// ***************************************************************************
pub trait RequestDebug {
    type Req;
    fn get_request_info(&self) -> String;
}

// ---------------------------------------------------------------------------
// debug_request:
// ---------------------------------------------------------------------------
// Dump http request information to the log.
pub fn debug_request(http_req: &Request, req: &impl RequestDebug) {
    // Check that debug or higher logging is in effect.
    let level = log::max_level();
    if level < LevelFilter::Debug {
        return;
    }

    // Accumulate the output.
    let mut s = "\n".to_string();

    // Restate the URI.
    let uri = http_req.uri();
    s += format!("  URI: {:?}\n", uri).as_str();

    // Accumulate the headers
    let it = http_req.headers().iter();
    for v in it {
         s += format!("  Header: {} = {:?} \n", v.0, v.1).as_str();
    };

    // List query parameters.
    if let Some(q) = uri.query() {
        s += format!("  Query Parameters: {:?}\n", q).as_str();
    } else {
        s += "  * No Query Parameters\n";
    }

    // Add the request's information.
    s += req.get_request_info().as_str();

    // Write the single log record.
    debug!("{}", s);
}

// ***************************************************************************
//                                  Tests
// ***************************************************************************
#[cfg(test)]
mod tests {
    use super::*;
    use poem::http::{HeaderValue, Uri};

    #[test]
    fn required_header_present() {
        let req = Request::builder().header("User-Agent", "TestAgent/1.0").finish();
        assert_eq!(required_header(&req, "User-Agent").unwrap(), "TestAgent/1.0");
        assert_eq!(required_header(&req, "user-agent").unwrap(), "TestAgent/1.0");
    }

    #[test]
    fn required_header_missing() {
        let req = Request::builder().finish();
        match required_header(&req, "User-Agent") {
            Err(Errors::MissingHeader(name)) => assert_eq!(name, "User-Agent"),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn required_header_non_ascii() {
        // UTF-8 bytes are kept as sent.
        let value = HeaderValue::from_bytes("Mozilla/5.0 Zoë".as_bytes()).unwrap();
        let req = Request::builder().header("User-Agent", value).finish();
        assert_eq!(required_header(&req, "User-Agent").unwrap(), "Mozilla/5.0 Zoë");

        // Other bytes are replaced, never rejected.
        let value = HeaderValue::from_bytes(b"Agent\xff").unwrap();
        let req = Request::builder().header("User-Agent", value).finish();
        assert_eq!(required_header(&req, "User-Agent").unwrap(), "Agent\u{FFFD}");
    }

    #[test]
    fn remote_ip_drops_port() {
        let http_req = poem::http::Request::builder().body(()).unwrap();
        let req = request_from_peer(http_req, "127.0.0.1:54321");
        assert_eq!(remote_ip(&req), "127.0.0.1");

        let http_req = poem::http::Request::builder().body(()).unwrap();
        let req = request_from_peer(http_req, "[::1]:8080");
        assert_eq!(remote_ip(&req), "::1");
    }

    #[test]
    fn remote_ip_without_socket_peer() {
        let req = Request::builder().finish();
        assert!(!remote_ip(&req).is_empty());
    }

    #[test]
    fn client_info_omits_header_values() {
        let req = Request::builder()
            .uri(Uri::from_static("/getUserAgent?x=1"))
            .header("User-Agent", "TestAgent/1.0")
            .header("Accept", "text/html")
            .finish();
        let info = client_info(&req);
        assert!(info.contains("Method : GET"));
        assert!(info.contains("Path : /getUserAgent"));
        assert!(info.contains("Headers : accept, user-agent"));
        assert!(!info.contains("TestAgent/1.0"));
        assert!(!info.contains("text/html"));
    }

    #[test]
    fn absolute_path_unchanged() {
        assert_eq!(get_absolute_path("/tmp/sample"), "/tmp/sample");
    }
}
