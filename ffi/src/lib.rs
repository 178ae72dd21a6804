//! C-ABI wrapper around `company-core`.
//!
//! # Overview
//! Lets a host UI written in any language with a C FFI build the company
//! query request, perform the HTTP call itself, and hand the response back
//! for decoding. No async runtime crosses the boundary.
//!
//! # Design
//! - Every `extern "C"` function wraps its body in `catch_unwind` so panics
//!   never cross the FFI boundary.
//! - `company_build_request` / `company_parse_response` mirror the core's
//!   host-does-IO split 1:1.
//! - The C caller owns all returned pointers and must release them with the
//!   matching `company_free_*` function.

pub mod types;

use std::ffi::{CStr, CString};
use std::os::raw::c_char;
use std::panic::catch_unwind;

use company_core::{company_request, extract_company, CompanyData, GraphQlClient, HttpResponse};

use types::*;

/// Read a C string, lossily replacing invalid UTF-8.
///
/// # Safety
/// `ptr` must be non-null and point to a NUL-terminated string.
unsafe fn read_c_str(ptr: *const c_char) -> String {
    unsafe { CStr::from_ptr(ptr) }.to_string_lossy().into_owned()
}

// ---------------------------------------------------------------------------
// Client lifecycle
// ---------------------------------------------------------------------------

/// Create a client bound to `endpoint`. `api_key` may be null; when set it
/// is sent in the `x-api-key` header.
///
/// Returns null if `endpoint` is null or empty, or if an internal panic occurs.
/// The caller must free the returned pointer with `company_client_free`.
#[unsafe(no_mangle)]
pub extern "C" fn company_client_new(
    endpoint: *const c_char,
    api_key: *const c_char,
) -> *mut FfiCompanyClient {
    catch_unwind(|| {
        if endpoint.is_null() {
            return std::ptr::null_mut();
        }
        let endpoint = unsafe { read_c_str(endpoint) };
        let mut config = match company_core::ClientConfig::new(endpoint) {
            Ok(config) => config,
            Err(_) => return std::ptr::null_mut(),
        };
        if !api_key.is_null() {
            config = config.with_api_key(unsafe { read_c_str(api_key) });
        }
        let client = GraphQlClient::from_config(&config);
        Box::into_raw(Box::new(FfiCompanyClient { inner: client }))
    })
    .unwrap_or(std::ptr::null_mut())
}

/// Free a client created by `company_client_new`. Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn company_client_free(client: *mut FfiCompanyClient) {
    if !client.is_null() {
        let _ = catch_unwind(|| {
            drop(unsafe { Box::from_raw(client) });
        });
    }
}

// ---------------------------------------------------------------------------
// Build / parse
// ---------------------------------------------------------------------------

/// Build the HTTP request for the company query.
///
/// Returns null if `client` is null or serialization fails.
/// The caller must free the returned pointer with `company_free_request`.
#[unsafe(no_mangle)]
pub extern "C" fn company_build_request(client: *const FfiCompanyClient) -> *mut FfiHttpRequest {
    catch_unwind(|| {
        if client.is_null() {
            return std::ptr::null_mut();
        }
        let client = unsafe { &*client };
        match client.inner.build_request(&company_request()) {
            Ok(req) => FfiHttpRequest::from_core(req),
            Err(_) => std::ptr::null_mut(),
        }
    })
    .unwrap_or(std::ptr::null_mut())
}

/// # Safety
/// A non-null `resp.body` must point to `resp.body_len` readable bytes.
unsafe fn ffi_response_to_core(resp: &FfiHttpResponse) -> HttpResponse {
    let body = if resp.body.is_null() || resp.body_len == 0 {
        Vec::new()
    } else {
        unsafe { std::slice::from_raw_parts(resp.body, resp.body_len) }.to_vec()
    };
    HttpResponse::new(resp.status, body)
}

/// Decode the HTTP response to the company query.
///
/// Never returns null. The caller must free the result with
/// `company_free_result`.
#[unsafe(no_mangle)]
pub extern "C" fn company_parse_response(
    client: *const FfiCompanyClient,
    response: *const FfiHttpResponse,
) -> *mut FfiCompanyResult {
    catch_unwind(|| {
        if client.is_null() {
            return FfiCompanyResult::null_arg("client");
        }
        if response.is_null() {
            return FfiCompanyResult::null_arg("response");
        }
        let client = unsafe { &*client };
        let resp = unsafe { ffi_response_to_core(&*response) };
        let outcome = client
            .inner
            .parse_response::<CompanyData>(resp)
            .and_then(extract_company);
        match outcome {
            Ok(info) => FfiCompanyResult::ok(info),
            Err(e) => FfiCompanyResult::from_error(e),
        }
    })
    .unwrap_or_else(|_| FfiCompanyResult::panic("panic in company_parse_response"))
}

// ---------------------------------------------------------------------------
// Free functions
// ---------------------------------------------------------------------------

/// Free a request returned by `company_build_request`. Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn company_free_request(req: *mut FfiHttpRequest) {
    if req.is_null() {
        return;
    }
    let _ = catch_unwind(|| {
        let req = unsafe { Box::from_raw(req) };
        company_free_string(req.url);
        company_free_string(req.body);
        if !req.headers.is_null() && req.headers_len > 0 {
            let slice = std::ptr::slice_from_raw_parts_mut(req.headers, req.headers_len as usize);
            let headers = unsafe { Box::from_raw(slice) };
            for h in headers.iter() {
                company_free_string(h.key);
                company_free_string(h.value);
            }
        }
    });
}

/// Free a result returned by `company_parse_response`. Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn company_free_result(result: *mut FfiCompanyResult) {
    if result.is_null() {
        return;
    }
    let _ = catch_unwind(|| {
        let result = unsafe { Box::from_raw(result) };
        company_free_string(result.error_message);
        if !result.company.is_null() {
            let company = unsafe { Box::from_raw(result.company) };
            company_free_string(company.ceo);
            company_free_string(company.summary);
        }
    });
}

/// Free a C string allocated by this library. Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn company_free_string(s: *mut c_char) {
    if !s.is_null() {
        let _ = catch_unwind(|| {
            drop(unsafe { CString::from_raw(s) });
        });
    }
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::CString;

    fn new_client() -> *mut FfiCompanyClient {
        let url = CString::new("http://localhost:4000").unwrap();
        company_client_new(url.as_ptr(), std::ptr::null())
    }

    fn parse(client: *const FfiCompanyClient, status: u16, body: &str) -> *mut FfiCompanyResult {
        parse_bytes(client, status, body.as_bytes())
    }

    fn parse_bytes(
        client: *const FfiCompanyClient,
        status: u16,
        body: &[u8],
    ) -> *mut FfiCompanyResult {
        let resp = FfiHttpResponse {
            status,
            body: body.as_ptr(),
            body_len: body.len(),
        };
        company_parse_response(client, &resp)
    }

    #[test]
    fn client_new_and_free() {
        let client = new_client();
        assert!(!client.is_null());
        company_client_free(client);
    }

    #[test]
    fn client_new_null_returns_null() {
        let client = company_client_new(std::ptr::null(), std::ptr::null());
        assert!(client.is_null());
    }

    #[test]
    fn client_new_empty_endpoint_returns_null() {
        let url = CString::new("").unwrap();
        let client = company_client_new(url.as_ptr(), std::ptr::null());
        assert!(client.is_null());
    }

    #[test]
    fn client_free_null_is_safe() {
        company_client_free(std::ptr::null_mut());
    }

    #[test]
    fn build_request_produces_post_with_json_body() {
        let client = new_client();
        let req = company_build_request(client);
        assert!(!req.is_null());

        let req_ref = unsafe { &*req };
        assert!(matches!(req_ref.method, FfiHttpMethod::Post));
        let url = unsafe { CStr::from_ptr(req_ref.url) }.to_str().unwrap();
        assert_eq!(url, "http://localhost:4000/");
        assert_eq!(req_ref.headers_len, 1);

        let body_str = unsafe { CStr::from_ptr(req_ref.body) }.to_str().unwrap();
        let body: serde_json::Value = serde_json::from_str(body_str).unwrap();
        assert!(body["query"].as_str().unwrap().contains("employees"));
        assert_eq!(body["operationName"], "ExampleQuery");

        company_free_request(req);
        company_client_free(client);
    }

    #[test]
    fn build_request_carries_api_key() {
        let url = CString::new("http://localhost:4000").unwrap();
        let key = CString::new("secret").unwrap();
        let client = company_client_new(url.as_ptr(), key.as_ptr());
        let req = company_build_request(client);

        let req_ref = unsafe { &*req };
        assert_eq!(req_ref.headers_len, 2);
        let headers =
            unsafe { std::slice::from_raw_parts(req_ref.headers, req_ref.headers_len as usize) };
        let found = headers.iter().any(|h| {
            let k = unsafe { CStr::from_ptr(h.key) }.to_str().unwrap();
            let v = unsafe { CStr::from_ptr(h.value) }.to_str().unwrap();
            k == "x-api-key" && v == "secret"
        });
        assert!(found);

        company_free_request(req);
        company_client_free(client);
    }

    #[test]
    fn build_request_null_client_returns_null() {
        assert!(company_build_request(std::ptr::null()).is_null());
    }

    #[test]
    fn parse_success() {
        let client = new_client();
        let result = parse(
            client,
            200,
            r#"{"data":{"company":{"ceo":"Jane Doe","summary":"A tech company.","employees":500}}}"#,
        );
        let r = unsafe { &*result };
        assert_eq!(r.error_code, FfiErrorCode::Ok);
        assert!(r.error_message.is_null());

        let company = unsafe { &*r.company };
        let ceo = unsafe { CStr::from_ptr(company.ceo) }.to_str().unwrap();
        let summary = unsafe { CStr::from_ptr(company.summary) }.to_str().unwrap();
        assert_eq!(ceo, "Jane Doe");
        assert_eq!(summary, "A tech company.");
        assert_eq!(company.employees, 500);

        company_free_result(result);
        company_client_free(client);
    }

    #[test]
    fn parse_server_error_keeps_status() {
        let client = new_client();
        let result = parse(client, 500, "");
        let r = unsafe { &*result };
        assert_eq!(r.error_code, FfiErrorCode::Http);
        assert_eq!(r.http_status, 500);
        assert!(r.company.is_null());
        let msg = unsafe { CStr::from_ptr(r.error_message) }.to_str().unwrap();
        assert!(msg.contains("500"));

        company_free_result(result);
        company_client_free(client);
    }

    #[test]
    fn parse_null_data_is_missing_data() {
        let client = new_client();
        let result = parse(client, 200, r#"{"data":null}"#);
        let r = unsafe { &*result };
        assert_eq!(r.error_code, FfiErrorCode::MissingData);
        assert!(r.company.is_null());

        company_free_result(result);
        company_client_free(client);
    }

    #[test]
    fn parse_bad_json_is_decode_error() {
        let client = new_client();
        let result = parse(client, 200, "not json");
        let r = unsafe { &*result };
        assert_eq!(r.error_code, FfiErrorCode::Decode);

        company_free_result(result);
        company_client_free(client);
    }

    #[test]
    fn parse_null_body_is_decode_error() {
        let client = new_client();
        let resp = FfiHttpResponse {
            status: 200,
            body: std::ptr::null(),
            body_len: 0,
        };
        let result = company_parse_response(client, &resp);
        let r = unsafe { &*result };
        assert_eq!(r.error_code, FfiErrorCode::Decode);

        company_free_result(result);
        company_client_free(client);
    }

    #[test]
    fn parse_invalid_utf8_body_is_decode_error() {
        let client = new_client();
        let mut body = br#"{"data":{"company":{"ceo":""#.to_vec();
        body.push(0xFF);
        body.extend_from_slice(br#"","summary":"s","employees":1}}}"#);
        let result = parse_bytes(client, 200, &body);
        let r = unsafe { &*result };
        assert_eq!(r.error_code, FfiErrorCode::Decode);
        assert!(r.company.is_null());

        company_free_result(result);
        company_client_free(client);
    }

    #[test]
    fn parse_body_with_embedded_nul_is_not_truncated() {
        let client = new_client();
        // Cutting at the NUL would leave a valid `{}` prefix.
        let result = parse_bytes(client, 200, b"{}\0{\"data\":null}");
        let r = unsafe { &*result };
        assert_eq!(r.error_code, FfiErrorCode::Decode);

        company_free_result(result);
        company_client_free(client);
    }

    #[test]
    fn parse_null_client_returns_null_arg() {
        let result = parse(std::ptr::null(), 200, "{}");
        let r = unsafe { &*result };
        assert_eq!(r.error_code, FfiErrorCode::NullArg);

        company_free_result(result);
    }

    #[test]
    fn parse_null_response_returns_null_arg() {
        let client = new_client();
        let result = company_parse_response(client, std::ptr::null());
        let r = unsafe { &*result };
        assert_eq!(r.error_code, FfiErrorCode::NullArg);

        company_free_result(result);
        company_client_free(client);
    }

    #[test]
    fn free_request_null_is_safe() {
        company_free_request(std::ptr::null_mut());
    }

    #[test]
    fn free_result_null_is_safe() {
        company_free_result(std::ptr::null_mut());
    }

    #[test]
    fn free_string_null_is_safe() {
        company_free_string(std::ptr::null_mut());
    }
}
