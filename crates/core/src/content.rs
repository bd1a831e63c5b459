//! Content visibility and organisational-section vocabularies.
//!
//! Both are stored as plain text columns guarded by CHECK constraints; these
//! enums are the canonical list the API validates against before writing.

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Publication status
// ---------------------------------------------------------------------------

/// Draft rows are only visible to authenticated admins.
pub const STATUS_DRAFT: &str = "draft";

/// Published rows are visible on the public site.
pub const STATUS_PUBLISHED: &str = "published";

/// Default news category used by the admin screens.
pub const DEFAULT_NEWS_CATEGORY: &str = "Kegiatan";

/// Visibility of a news item or weaving product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PublicationStatus {
    Draft,
    #[default]
    Published,
}

impl PublicationStatus {
    /// Parse from the database `status` column.
    pub fn from_name(name: &str) -> Result<Self, CoreError> {
        match name {
            STATUS_DRAFT => Ok(Self::Draft),
            STATUS_PUBLISHED => Ok(Self::Published),
            other => Err(CoreError::Validation(format!(
                "Invalid status '{other}'. Must be one of: {STATUS_DRAFT}, {STATUS_PUBLISHED}"
            ))),
        }
    }

    /// Database name value.
    pub fn name(self) -> &'static str {
        match self {
            Self::Draft => STATUS_DRAFT,
            Self::Published => STATUS_PUBLISHED,
        }
    }
}

/// Resolve an optional status from a request body, falling back to published.
pub fn resolve_status(status: Option<&str>) -> Result<PublicationStatus, CoreError> {
    match status.map(str::trim) {
        None | Some("") => Ok(PublicationStatus::default()),
        Some(name) => PublicationStatus::from_name(name),
    }
}

// ---------------------------------------------------------------------------
// Organisation sections
// ---------------------------------------------------------------------------

/// Section of the organisational chart a member belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OrgSection {
    #[default]
    Pengurus,
    Pengawas,
    PengurusHarian,
    Seksi,
}

/// Valid section names, in display order.
pub const ORG_SECTIONS: &[&str] = &["pengurus", "pengawas", "pengurus_harian", "seksi"];

impl OrgSection {
    /// Parse from the database `section` column.
    pub fn from_name(name: &str) -> Result<Self, CoreError> {
        match name {
            "pengurus" => Ok(Self::Pengurus),
            "pengawas" => Ok(Self::Pengawas),
            "pengurus_harian" => Ok(Self::PengurusHarian),
            "seksi" => Ok(Self::Seksi),
            other => Err(CoreError::Validation(format!(
                "Invalid section '{other}'. Must be one of: {ORG_SECTIONS:?}"
            ))),
        }
    }

    /// Database name value.
    pub fn name(self) -> &'static str {
        match self {
            Self::Pengurus => "pengurus",
            Self::Pengawas => "pengawas",
            Self::PengurusHarian => "pengurus_harian",
            Self::Seksi => "seksi",
        }
    }
}

/// Resolve an optional section from a request body, falling back to `pengurus`.
pub fn resolve_section(section: Option<&str>) -> Result<OrgSection, CoreError> {
    match section.map(str::trim) {
        None | Some("") => Ok(OrgSection::default()),
        Some(name) => OrgSection::from_name(name),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn status_round_trips_through_name() {
        for status in [PublicationStatus::Draft, PublicationStatus::Published] {
            assert_eq!(PublicationStatus::from_name(status.name()).unwrap(), status);
        }
    }

    #[test]
    fn unknown_status_is_rejected() {
        assert_matches!(
            PublicationStatus::from_name("archived"),
            Err(CoreError::Validation(_))
        );
    }

    #[test]
    fn missing_status_defaults_to_published() {
        assert_eq!(resolve_status(None).unwrap(), PublicationStatus::Published);
        assert_eq!(resolve_status(Some("  ")).unwrap(), PublicationStatus::Published);
        assert_eq!(resolve_status(Some("draft")).unwrap(), PublicationStatus::Draft);
    }

    #[test]
    fn every_listed_section_parses() {
        for name in ORG_SECTIONS {
            assert_eq!(OrgSection::from_name(name).unwrap().name(), *name);
        }
    }

    #[test]
    fn unknown_section_is_rejected() {
        let err = OrgSection::from_name("bendahara").unwrap_err();
        assert!(err.to_string().contains("bendahara"));
    }

    #[test]
    fn missing_section_defaults_to_pengurus() {
        assert_eq!(resolve_section(None).unwrap(), OrgSection::Pengurus);
        assert_eq!(resolve_section(Some("")).unwrap(), OrgSection::Pengurus);
        assert_eq!(
            resolve_section(Some("pengurus_harian")).unwrap(),
            OrgSection::PengurusHarian
        );
    }
}
