//! Domain-level error model.
//!
//! An [`Error`] is a head link (a [`Sentinel`] plus optional
//! [`ErrorPayload`]) followed by an ordered list of causes. Identity checks
//! with [`Error::is`] walk the whole chain, so a caller can match on any
//! sentinel that was wrapped at any depth.
//!
//! These errors are transport agnostic. Inbound adapters map
//! [`ErrorCode`] to HTTP statuses or any other protocol-specific envelope.

use std::error::Error as StdError;
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// Layer tag carried by every sentinel raised from the service layer.
pub const SERVICE_LAYER: &str = "service";
/// Layer tag carried by sentinels raised from store adapters.
pub const STORE_LAYER: &str = "store";

/// Stable machine-readable error code describing the failure category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum ErrorCode {
    /// The resource does not exist.
    NotFound = 1,
    /// A unique value is already taken.
    Duplicated = 2,
    /// A quota or cardinality limit was reached.
    Limit = 3,
    /// The request failed validation.
    Invalid = 4,
    /// The operation requires payment.
    Payment = 5,
    /// The store failed while executing the operation.
    Store = 6,
}

impl ErrorCode {
    /// Every code, in discriminant order.
    pub const ALL: [Self; 6] = [
        Self::NotFound,
        Self::Duplicated,
        Self::Limit,
        Self::Invalid,
        Self::Payment,
        Self::Store,
    ];

    /// Numeric discriminant.
    pub const fn as_raw(self) -> u8 {
        self as u8
    }

    /// Decode a numeric code; unknown values yield `None`.
    ///
    /// # Examples
    /// ```
    /// use tenant_backend::domain::ErrorCode;
    ///
    /// assert_eq!(ErrorCode::from_raw(2), Some(ErrorCode::Duplicated));
    /// assert_eq!(ErrorCode::from_raw(42), None);
    /// ```
    pub fn from_raw(raw: i64) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|code| i64::from(code.as_raw()) == raw)
    }

    /// Stable snake_case name.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NotFound => "not_found",
            Self::Duplicated => "duplicated",
            Self::Limit => "limit",
            Self::Invalid => "invalid",
            Self::Payment => "payment",
            Self::Store => "store",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Named, payload-free error used as an identity anchor.
///
/// Two sentinels are the same when their layer and tag match; the message
/// and code are descriptive only.
///
/// ## Invariants
/// - `tag` is unique within its layer.
#[derive(Debug, Clone, Copy)]
pub struct Sentinel {
    tag: &'static str,
    message: &'static str,
    layer: &'static str,
    code: ErrorCode,
}

impl Sentinel {
    /// Declare a sentinel. Usable in `const` context.
    pub const fn new(
        tag: &'static str,
        message: &'static str,
        layer: &'static str,
        code: ErrorCode,
    ) -> Self {
        Self {
            tag,
            message,
            layer,
            code,
        }
    }

    /// Stable identity tag.
    pub const fn tag(&self) -> &'static str {
        self.tag
    }

    /// Human-readable message.
    pub const fn message(&self) -> &'static str {
        self.message
    }

    /// Layer that owns this sentinel.
    pub const fn layer(&self) -> &'static str {
        self.layer
    }

    /// Failure category.
    pub const fn code(&self) -> ErrorCode {
        self.code
    }
}

impl PartialEq for Sentinel {
    fn eq(&self, other: &Self) -> bool {
        self.layer == other.layer && self.tag == other.tag
    }
}

impl Eq for Sentinel {}

impl fmt::Display for Sentinel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message)
    }
}

/// Structured data attached to an error so callers can render precise
/// messages without re-deriving them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ErrorPayload {
    /// Identifier of the missing resource.
    NotFound { id: String },
    /// Values that collide with other resources.
    Duplicated { values: Vec<String> },
    /// Names of the fields that failed validation.
    Invalid { fields: Vec<String> },
    /// The limit that was reached.
    Limit { max: u32 },
}

#[derive(Debug, Clone)]
struct DomainLink {
    sentinel: Sentinel,
    payload: Option<ErrorPayload>,
}

#[derive(Debug, Clone)]
enum Cause {
    Domain(DomainLink),
    Source(Arc<dyn StdError + Send + Sync>),
}

/// One element of an error chain, as yielded by [`Error::chain`].
#[derive(Debug, Clone, Copy)]
pub enum Link<'a> {
    /// A domain link identified by its sentinel.
    Domain {
        sentinel: &'a Sentinel,
        payload: Option<&'a ErrorPayload>,
    },
    /// A foreign error kept as the root cause of a domain failure.
    Source(&'a (dyn StdError + Send + Sync + 'static)),
}

impl fmt::Display for Link<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Domain { sentinel, .. } => fmt::Display::fmt(sentinel, f),
            Self::Source(source) => fmt::Display::fmt(source, f),
        }
    }
}

/// Structured domain error.
///
/// ## Invariants
/// - The head link is always a domain link, so [`Error::code`] and
///   [`Error::layer`] are total.
/// - `is(s)` holds iff `s` appears anywhere in the chain.
///
/// # Examples
/// ```
/// use tenant_backend::domain::{Error, ErrorCode, sentinels};
///
/// let err = Error::not_found(sentinels::USER_NOT_FOUND, "42")
///     .wrap(sentinels::NO_DOCUMENTS);
/// assert_eq!(err.code(), ErrorCode::NotFound);
/// assert!(err.is(&sentinels::USER_NOT_FOUND));
/// assert!(err.is(&sentinels::NO_DOCUMENTS));
/// assert!(!err.is(&sentinels::USER_INVALID));
/// ```
#[derive(Debug, Clone)]
pub struct Error {
    head: DomainLink,
    causes: Vec<Cause>,
}

impl Error {
    /// Start a chain from a sentinel.
    pub fn new(sentinel: Sentinel) -> Self {
        Self {
            head: DomainLink {
                sentinel,
                payload: None,
            },
            causes: Vec::new(),
        }
    }

    /// Attach structured data to the head link, keeping its identity.
    #[must_use]
    pub fn with_payload(mut self, payload: ErrorPayload) -> Self {
        self.head.payload = Some(payload);
        self
    }

    /// Append `inner` (and its whole chain) as causes of this error.
    ///
    /// Both `self`'s and `inner`'s sentinels remain matchable through
    /// [`Error::is`]. Cost is linear in the length of `inner`'s chain.
    #[must_use]
    pub fn wrap(mut self, inner: impl Into<Error>) -> Self {
        let Error { head, causes } = inner.into();
        self.causes.reserve(causes.len() + 1);
        self.causes.push(Cause::Domain(head));
        self.causes.extend(causes);
        self
    }

    /// Append a foreign error as the next cause.
    #[must_use]
    pub fn wrap_source<E>(mut self, source: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        self.causes.push(Cause::Source(Arc::new(source)));
        self
    }

    /// `sentinel` error carrying `NotFound { id }`.
    pub fn not_found(sentinel: Sentinel, id: impl Into<String>) -> Self {
        Self::new(sentinel).with_payload(ErrorPayload::NotFound { id: id.into() })
    }

    /// `sentinel` error carrying `Invalid { fields }`.
    pub fn invalid<I, S>(sentinel: Sentinel, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(sentinel).with_payload(ErrorPayload::Invalid {
            fields: fields.into_iter().map(Into::into).collect(),
        })
    }

    /// `sentinel` error carrying `Duplicated { values }`.
    pub fn duplicated<I, S>(sentinel: Sentinel, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(sentinel).with_payload(ErrorPayload::Duplicated {
            values: values.into_iter().map(Into::into).collect(),
        })
    }

    /// `sentinel` error carrying `Limit { max }`.
    pub fn limit(sentinel: Sentinel, max: u32) -> Self {
        Self::new(sentinel).with_payload(ErrorPayload::Limit { max })
    }

    /// Failure category of the head link.
    pub fn code(&self) -> ErrorCode {
        self.head.sentinel.code()
    }

    /// Layer that raised the head link.
    pub fn layer(&self) -> &'static str {
        self.head.sentinel.layer()
    }

    /// Message of the head link.
    pub fn message(&self) -> &'static str {
        self.head.sentinel.message()
    }

    /// Sentinel of the head link.
    pub fn sentinel(&self) -> &Sentinel {
        &self.head.sentinel
    }

    /// Payload of the head link.
    pub fn payload(&self) -> Option<&ErrorPayload> {
        self.head.payload.as_ref()
    }

    /// Whether `sentinel` appears anywhere in the chain.
    pub fn is(&self, sentinel: &Sentinel) -> bool {
        self.chain().any(|link| match link {
            Link::Domain { sentinel: own, .. } => own == sentinel,
            Link::Source(_) => false,
        })
    }

    /// Walk the chain head first.
    pub fn chain(&self) -> impl Iterator<Item = Link<'_>> + '_ {
        std::iter::once(&self.head)
            .map(DomainLink::view)
            .chain(self.causes.iter().map(Cause::view))
    }

    /// First foreign cause of type `T`.
    pub fn find_source<T>(&self) -> Option<&T>
    where
        T: StdError + 'static,
    {
        self.causes.iter().find_map(|cause| match cause {
            Cause::Source(source) => source.downcast_ref::<T>(),
            Cause::Domain(_) => None,
        })
    }
}

impl DomainLink {
    fn view(&self) -> Link<'_> {
        Link::Domain {
            sentinel: &self.sentinel,
            payload: self.payload.as_ref(),
        }
    }
}

impl Cause {
    fn view(&self) -> Link<'_> {
        match self {
            Self::Domain(link) => link.view(),
            Self::Source(source) => Link::Source(source.as_ref()),
        }
    }
}

impl From<Sentinel> for Error {
    fn from(sentinel: Sentinel) -> Self {
        Self::new(sentinel)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())?;
        for cause in &self.causes {
            write!(f, ": {}", cause.view())?;
        }
        Ok(())
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.causes.iter().find_map(|cause| match cause {
            Cause::Source(source) => Some(source.as_ref() as &(dyn StdError + 'static)),
            Cause::Domain(_) => None,
        })
    }
}
