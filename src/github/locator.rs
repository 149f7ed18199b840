//! Issue URL parsing and identity wrappers.

use thiserror::Error;
use url::Url;

/// Errors raised while parsing an issue URL.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LocatorError {
    /// The input is not a valid absolute URL.
    #[error("issue URL is invalid: {0}")]
    InvalidUrl(String),

    /// The URL path is not `/owner/repo/issues/<number>`.
    #[error("issue URL must match /owner/repo/issues/<number>")]
    MissingPathSegments,

    /// The issue number is not a positive integer.
    #[error("issue number must be a positive integer")]
    InvalidIssueNumber,
}

/// Repository owner wrapper to avoid stringly typed parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryOwner(String);

impl RepositoryOwner {
    /// Wraps a non-empty owner name.
    ///
    /// # Errors
    ///
    /// Returns [`LocatorError::MissingPathSegments`] for an empty value.
    pub fn new(value: &str) -> Result<Self, LocatorError> {
        if value.is_empty() {
            return Err(LocatorError::MissingPathSegments);
        }
        Ok(Self(value.to_owned()))
    }

    /// Borrow the owner value.
    #[must_use]
    pub const fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

/// Repository name wrapper to prevent parameter mix-ups.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryName(String);

impl RepositoryName {
    /// Wraps a non-empty repository name.
    ///
    /// # Errors
    ///
    /// Returns [`LocatorError::MissingPathSegments`] for an empty value.
    pub fn new(value: &str) -> Result<Self, LocatorError> {
        if value.is_empty() {
            return Err(LocatorError::MissingPathSegments);
        }
        Ok(Self(value.to_owned()))
    }

    /// Borrow the repository name.
    #[must_use]
    pub const fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

/// Issue number, always positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IssueNumber(u64);

impl IssueNumber {
    /// Wraps a positive issue number.
    ///
    /// # Errors
    ///
    /// Returns [`LocatorError::InvalidIssueNumber`] for zero.
    pub const fn new(value: u64) -> Result<Self, LocatorError> {
        if value == 0 {
            return Err(LocatorError::InvalidIssueNumber);
        }
        Ok(Self(value))
    }

    /// Returns the numeric value.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

/// Derives the API base URL for the host serving an issue page.
///
/// `github.com` maps to `https://api.github.com`; any other host is treated
/// as GitHub Enterprise and served from `/api/v3` on the same authority.
fn derive_api_base(parsed: &Url) -> Result<Url, LocatorError> {
    let host = parsed
        .host_str()
        .ok_or_else(|| LocatorError::InvalidUrl("URL must include a host".to_owned()))?;

    if host.eq_ignore_ascii_case("github.com") {
        return Url::parse("https://api.github.com")
            .map_err(|error| LocatorError::InvalidUrl(error.to_string()));
    }

    let mut api_url = parsed.clone();
    api_url.set_path("api/v3");
    api_url.set_query(None);
    api_url.set_fragment(None);
    Ok(api_url)
}

/// Parsed issue URL and derived API base.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssueLocator {
    api_base: Url,
    owner: RepositoryOwner,
    repository: RepositoryName,
    number: IssueNumber,
}

impl IssueLocator {
    /// Builds a locator from its parts against an explicit API base.
    #[must_use]
    pub const fn new(
        api_base: Url,
        owner: RepositoryOwner,
        repository: RepositoryName,
        number: IssueNumber,
    ) -> Self {
        Self {
            api_base,
            owner,
            repository,
            number,
        }
    }

    /// Parses an issue URL of the form
    /// `https://github.com/<owner>/<repo>/issues/<number>`.
    ///
    /// Trailing segments (such as `#issuecomment-1` fragments or extra path
    /// parts) are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`LocatorError::InvalidUrl`] when parsing fails,
    /// [`LocatorError::MissingPathSegments`] when the path does not name an
    /// issue, and [`LocatorError::InvalidIssueNumber`] when the number is not
    /// a positive integer.
    pub fn parse(input: &str) -> Result<Self, LocatorError> {
        let parsed =
            Url::parse(input).map_err(|error| LocatorError::InvalidUrl(error.to_string()))?;

        let mut segments = parsed
            .path_segments()
            .ok_or(LocatorError::MissingPathSegments)?;

        let owner_segment = segments.next().ok_or(LocatorError::MissingPathSegments)?;
        let repository_segment = segments.next().ok_or(LocatorError::MissingPathSegments)?;
        let marker = segments.next().ok_or(LocatorError::MissingPathSegments)?;
        let number_segment = segments.next().ok_or(LocatorError::MissingPathSegments)?;

        if marker != "issues" || number_segment.is_empty() {
            return Err(LocatorError::MissingPathSegments);
        }

        let owner = RepositoryOwner::new(owner_segment)?;
        let repository = RepositoryName::new(repository_segment)?;
        let number = number_segment
            .parse::<u64>()
            .map_err(|_| LocatorError::InvalidIssueNumber)
            .and_then(IssueNumber::new)?;

        Ok(Self {
            api_base: derive_api_base(&parsed)?,
            owner,
            repository,
            number,
        })
    }

    /// API base URL derived from the issue host.
    #[must_use]
    pub const fn api_base(&self) -> &Url {
        &self.api_base
    }

    /// Repository owner.
    #[must_use]
    pub const fn owner(&self) -> &RepositoryOwner {
        &self.owner
    }

    /// Repository name.
    #[must_use]
    pub const fn repository(&self) -> &RepositoryName {
        &self.repository
    }

    /// Issue number.
    #[must_use]
    pub const fn number(&self) -> IssueNumber {
        self.number
    }
}
