use std::collections::HashSet;
use std::path::Path;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// An editorial guide ("Guia"): a curated route through a handful of places.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Guide {
    /// URL slug, e.g. `petiscos-porto`.
    pub route: String,
    pub title: String,
    pub excerpt: String,
    pub cover: Option<String>,
    pub date: NaiveDate,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub sections: Vec<GuideSection>,
    /// Link to a shared map with every stop of the route.
    pub map_link: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GuideSection {
    pub heading: String,
    #[serde(default)]
    pub paragraphs: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct GuidesFile {
    guides: Vec<Guide>,
}

/// Load and validate the editorial guides from a YAML file.
///
/// Guides are returned newest first.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_guides(path: &Path) -> Result<Vec<Guide>, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::GuidesFileIo {
        path: path.display().to_string(),
        source: e,
    })?;
    parse_guides(&content)
}

/// Parse and validate guides from YAML text. Guides are returned newest first.
///
/// # Errors
///
/// Returns [`ConfigError::GuidesFileParse`] for malformed YAML and
/// [`ConfigError::Validation`] for empty titles, bad slugs, or duplicate routes.
pub fn parse_guides(content: &str) -> Result<Vec<Guide>, ConfigError> {
    let file: GuidesFile = serde_yaml::from_str(content)?;
    validate_guides(&file.guides)?;

    let mut guides = file.guides;
    guides.sort_by(|a, b| b.date.cmp(&a.date));
    Ok(guides)
}

fn validate_guides(guides: &[Guide]) -> Result<(), ConfigError> {
    let mut seen_routes = HashSet::new();

    for guide in guides {
        if guide.title.trim().is_empty() {
            return Err(ConfigError::Validation(format!(
                "guide '{}' must have a non-empty title",
                guide.route
            )));
        }

        if !is_slug(&guide.route) {
            return Err(ConfigError::Validation(format!(
                "guide '{}' has invalid route '{}'; use lowercase letters, digits and '-'",
                guide.title, guide.route
            )));
        }

        if !seen_routes.insert(guide.route.as_str()) {
            return Err(ConfigError::Validation(format!(
                "duplicate guide route: '{}'",
                guide.route
            )));
        }
    }

    Ok(())
}

fn is_slug(route: &str) -> bool {
    !route.is_empty()
        && !route.starts_with('-')
        && !route.ends_with('-')
        && route
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    const TWO_GUIDES: &str = r"
guides:
  - route: petiscos-porto
    title: Rota de Petiscos pelo Porto
    excerpt: Explora 2 locais icónicos do Porto e outro da nova escola.
    cover: /images/guias/gazela.jpg
    date: 2025-04-15
    tags: [Porto, Petiscos, Tascas]
    sections:
      - heading: Oficina dos Rissóis
        paragraphs:
          - Rissóis assados no forno, não fritos.
  - route: creta
    title: Rota de Restaurantes em Creta
    excerpt: Os melhores locais para belas refeições na ilha de Creta.
    date: 2025-08-25
";

    #[test]
    fn parse_guides_sorts_newest_first() {
        let guides = parse_guides(TWO_GUIDES).expect("valid guides");
        assert_eq!(guides.len(), 2);
        assert_eq!(guides[0].route, "creta");
        assert_eq!(guides[1].route, "petiscos-porto");
        assert_eq!(guides[1].tags, vec!["Porto", "Petiscos", "Tascas"]);
        assert_eq!(guides[1].sections[0].paragraphs.len(), 1);
        assert!(guides[0].sections.is_empty());
        assert!(guides[0].cover.is_none());
    }

    #[test]
    fn duplicate_routes_are_rejected() {
        let yaml = r"
guides:
  - { route: creta, title: A, excerpt: x, date: 2025-01-01 }
  - { route: creta, title: B, excerpt: y, date: 2025-01-02 }
";
        let err = parse_guides(yaml).unwrap_err();
        assert!(
            matches!(err, ConfigError::Validation(ref m) if m.contains("duplicate")),
            "got {err:?}"
        );
    }

    #[test]
    fn non_slug_route_is_rejected() {
        let yaml = r"
guides:
  - { route: Petiscos Porto, title: A, excerpt: x, date: 2025-01-01 }
";
        assert!(matches!(
            parse_guides(yaml),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn blank_title_is_rejected() {
        let yaml = r"
guides:
  - { route: creta, title: '  ', excerpt: x, date: 2025-01-01 }
";
        assert!(matches!(
            parse_guides(yaml),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn malformed_yaml_is_a_parse_error() {
        assert!(matches!(
            parse_guides("guides: [ {route: x"),
            Err(ConfigError::GuidesFileParse(_))
        ));
    }

    #[test]
    fn load_guides_reads_file() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        file.write_all(TWO_GUIDES.as_bytes()).expect("write");
        let guides = load_guides(file.path()).expect("load");
        assert_eq!(guides.len(), 2);
    }

    #[test]
    fn load_guides_missing_file_is_io_error() {
        let err = load_guides(Path::new("/nonexistent/guides.yaml")).unwrap_err();
        assert!(matches!(err, ConfigError::GuidesFileIo { .. }), "got {err:?}");
    }
}
