//! `#[repr(C)]` types for the FFI boundary.
//!
//! # Design
//! Each type mirrors a core type with C-compatible representations:
//! `*mut c_char` instead of `String`, pointer + length instead of `Vec`, and
//! enums with explicit discriminants. Conversions live here so `lib.rs`
//! stays focused on the `extern "C"` surface.

use std::ffi::CString;
use std::os::raw::c_char;

use company_core::{ClientError, CompanyInfo, HttpMethod};

/// Opaque handle to a `GraphQlClient`. C callers receive a pointer to this
/// and pass it back into every FFI function.
pub struct FfiCompanyClient {
    pub(crate) inner: company_core::GraphQlClient,
}

/// Strip interior NULs so any Rust string can become a C string.
pub(crate) fn to_c_string(s: String) -> *mut c_char {
    let bytes: Vec<u8> = s.into_bytes().into_iter().filter(|b| *b != 0).collect();
    CString::new(bytes).unwrap_or_default().into_raw()
}

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

#[repr(C)]
pub enum FfiHttpMethod {
    Get = 0,
    Post = 1,
}

impl From<HttpMethod> for FfiHttpMethod {
    fn from(m: HttpMethod) -> Self {
        match m {
            HttpMethod::Get => FfiHttpMethod::Get,
            HttpMethod::Post => FfiHttpMethod::Post,
        }
    }
}

#[repr(C)]
pub struct FfiHeader {
    pub key: *mut c_char,
    pub value: *mut c_char,
}

/// An HTTP request described as C-compatible plain data.
///
/// Built by `company_build_request`. The C caller executes it and passes the
/// response back through `company_parse_response`.
#[repr(C)]
pub struct FfiHttpRequest {
    pub method: FfiHttpMethod,
    pub url: *mut c_char,
    pub headers: *mut FfiHeader,
    pub headers_len: u32,
    pub body: *mut c_char,
}

impl FfiHttpRequest {
    pub(crate) fn from_core(req: company_core::HttpRequest) -> *mut Self {
        let url = to_c_string(req.url);
        let body = match req.body {
            Some(b) => to_c_string(b),
            None => std::ptr::null_mut(),
        };

        let headers_len = req.headers.len() as u32;
        let headers = if req.headers.is_empty() {
            std::ptr::null_mut()
        } else {
            let ffi_headers: Box<[FfiHeader]> = req
                .headers
                .into_iter()
                .map(|(k, v)| FfiHeader {
                    key: to_c_string(k),
                    value: to_c_string(v),
                })
                .collect();
            Box::into_raw(ffi_headers) as *mut FfiHeader
        };

        Box::into_raw(Box::new(FfiHttpRequest {
            method: req.method.into(),
            url,
            headers,
            headers_len,
            body,
        }))
    }
}

// ---------------------------------------------------------------------------
// Response input (caller-provided, not heap-allocated by us)
// ---------------------------------------------------------------------------

/// The C caller builds this after executing a request and passes a pointer
/// to `company_parse_response`. The FFI layer reads but never frees it.
///
/// `body` points to `body_len` raw bytes. It need not be NUL-terminated or
/// valid UTF-8; a null `body` is read as an empty body.
#[repr(C)]
pub struct FfiHttpResponse {
    pub status: u16,
    pub body: *const u8,
    pub body_len: usize,
}

// ---------------------------------------------------------------------------
// Result types
// ---------------------------------------------------------------------------

#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FfiErrorCode {
    Ok = 0,
    Transport = 1,
    Http = 2,
    Decode = 3,
    Serialization = 4,
    EmptyQuery = 5,
    MissingData = 6,
    Panic = 7,
    NullArg = 8,
}

#[repr(C)]
pub struct FfiCompany {
    pub ceo: *mut c_char,
    pub summary: *mut c_char,
    pub employees: u32,
}

/// Result envelope for `company_parse_response`.
///
/// On success `error_code` is `Ok`, `error_message` is null and `company`
/// points to the parsed payload. On failure `company` is null and
/// `error_message` is a human-readable C string.
#[repr(C)]
pub struct FfiCompanyResult {
    pub error_code: FfiErrorCode,
    pub error_message: *mut c_char,
    pub http_status: u16,
    pub company: *mut FfiCompany,
}

impl FfiCompanyResult {
    fn boxed(self) -> *mut Self {
        Box::into_raw(Box::new(self))
    }

    pub(crate) fn ok(info: CompanyInfo) -> *mut Self {
        let company = Box::new(FfiCompany {
            ceo: to_c_string(info.ceo),
            summary: to_c_string(info.summary),
            employees: info.employees,
        });
        FfiCompanyResult {
            error_code: FfiErrorCode::Ok,
            error_message: std::ptr::null_mut(),
            http_status: 0,
            company: Box::into_raw(company),
        }
        .boxed()
    }

    pub(crate) fn from_error(err: ClientError) -> *mut Self {
        let error_code = match &err {
            ClientError::Transport(_) => FfiErrorCode::Transport,
            ClientError::Http { .. } => FfiErrorCode::Http,
            ClientError::Decode(_) => FfiErrorCode::Decode,
            ClientError::Serialization(_) => FfiErrorCode::Serialization,
            ClientError::EmptyQuery => FfiErrorCode::EmptyQuery,
            ClientError::MissingData { .. } => FfiErrorCode::MissingData,
        };
        FfiCompanyResult {
            error_code,
            http_status: err.status().unwrap_or(0),
            error_message: to_c_string(err.to_string()),
            company: std::ptr::null_mut(),
        }
        .boxed()
    }

    pub(crate) fn null_arg(name: &str) -> *mut Self {
        Self::failure(FfiErrorCode::NullArg, format!("null argument: {name}"))
    }

    pub(crate) fn panic(msg: &str) -> *mut Self {
        Self::failure(FfiErrorCode::Panic, msg.to_string())
    }

    fn failure(error_code: FfiErrorCode, msg: String) -> *mut Self {
        FfiCompanyResult {
            error_code,
            error_message: to_c_string(msg),
            http_status: 0,
            company: std::ptr::null_mut(),
        }
        .boxed()
    }
}
