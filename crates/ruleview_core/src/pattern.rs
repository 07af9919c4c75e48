use crate::entity_path::{EntityPath, PATH_SEPARATOR};
use crate::validation::{PatternValidationRequest, PatternValidationResult, PatternValidator};
use crate::RuleViewError;
use chrono::Utc;
use regex::{Regex, RegexBuilder};
use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone)]
enum PatternSegment {
    /// `**`: zero or more whole segments.
    AnyDepth,
    Glob(Regex),
}

/// A compiled entity pattern such as `sales/*/orders/**`.
///
/// `*` matches any run of characters inside one segment, `?` matches a single
/// character inside one segment and a segment that is exactly `**` matches
/// any number of segments, including none. Matching ignores case.
#[derive(Debug, Clone)]
pub struct EntityPattern {
    source: String,
    segments: Vec<PatternSegment>,
}

impl EntityPattern {
    pub fn compile(source: &str) -> Result<Self, RuleViewError> {
        let trimmed = source.trim();
        if trimmed.is_empty() {
            return Err(RuleViewError::InvalidPattern(
                "pattern must not be empty".to_string(),
            ));
        }

        let segments = trimmed
            .split(PATH_SEPARATOR)
            .enumerate()
            .map(|(index, segment)| compile_segment(trimmed, index, segment))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            source: trimmed.to_string(),
            segments,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }

    pub fn matches(&self, path: &EntityPath) -> bool {
        let parts: Vec<&str> = path.segments().collect();
        match_segments(&self.segments, &parts)
    }
}

impl fmt::Display for EntityPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

fn compile_segment(
    pattern: &str,
    index: usize,
    segment: &str,
) -> Result<PatternSegment, RuleViewError> {
    if segment.is_empty() {
        return Err(RuleViewError::InvalidPattern(format!(
            "'{}' has an empty segment at position {}",
            pattern, index
        )));
    }

    if segment == "**" {
        return Ok(PatternSegment::AnyDepth);
    }

    let mut expr = String::with_capacity(segment.len() + 8);
    expr.push('^');
    for ch in segment.chars() {
        match ch {
            '*' => expr.push_str("[^/]*"),
            '?' => expr.push_str("[^/]"),
            other => expr.push_str(&regex::escape(other.encode_utf8(&mut [0; 4]))),
        }
    }
    expr.push('$');

    RegexBuilder::new(&expr)
        .case_insensitive(true)
        .build()
        .map(PatternSegment::Glob)
        .map_err(|e| RuleViewError::InvalidPattern(format!("'{}': {}", pattern, e)))
}

/// Table-driven match over `(pattern position, path position)`, so a run of
/// `**` segments stays linear in the path length.
fn match_segments(pattern: &[PatternSegment], path: &[&str]) -> bool {
    // `next[j]`: the pattern suffix after the current segment matches `path[j..]`.
    let mut next = vec![false; path.len() + 1];
    next[path.len()] = true;

    for segment in pattern.iter().rev() {
        let mut current = vec![false; path.len() + 1];
        for j in (0..=path.len()).rev() {
            current[j] = match segment {
                PatternSegment::AnyDepth => next[j] || (j < path.len() && current[j + 1]),
                PatternSegment::Glob(regex) => {
                    j < path.len() && next[j + 1] && regex.is_match(path[j])
                }
            };
        }
        next = current;
    }

    next[0]
}

fn compile_all(patterns: &[String]) -> Result<Vec<EntityPattern>, RuleViewError> {
    patterns.iter().map(|p| EntityPattern::compile(p)).collect()
}

/// Resolves patterns against a fixed list of known entities.
///
/// An entity is reported as matched when an include pattern selects it, and
/// as excluded when an exclude pattern also selects it. Entities that no
/// include pattern selects are not reported at all.
#[derive(Debug, Clone, Default)]
pub struct CatalogValidator {
    entities: Vec<EntityPath>,
}

impl CatalogValidator {
    pub fn new(entities: Vec<EntityPath>) -> Self {
        Self { entities }
    }

    /// Parses a catalog with one path per line; blank lines and lines
    /// starting with `#` are skipped.
    pub fn from_lines(text: &str) -> Result<Self, RuleViewError> {
        let entities = text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .map(EntityPath::parse)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self::new(entities))
    }

    pub fn from_path(path: &Path) -> Result<Self, RuleViewError> {
        let content = fs::read_to_string(path).map_err(RuleViewError::IoError)?;
        Self::from_lines(&content)
    }

    pub fn entities(&self) -> &[EntityPath] {
        &self.entities
    }
}

impl PatternValidator for CatalogValidator {
    fn validate(
        &self,
        request: &PatternValidationRequest,
    ) -> Result<PatternValidationResult, RuleViewError> {
        let includes = compile_all(&request.include_patterns)?;
        let excludes = compile_all(&request.exclude_patterns)?;

        let mut include_hits = vec![0usize; includes.len()];
        let mut exclude_hits = vec![0usize; excludes.len()];
        let mut matched = Vec::new();
        let mut excluded = Vec::new();
        let mut annotations = HashMap::new();

        for entity in &self.entities {
            let Some(include_idx) = includes.iter().position(|p| p.matches(entity)) else {
                continue;
            };
            include_hits[include_idx] += 1;

            let key = entity.as_str().to_string();
            match excludes.iter().position(|p| p.matches(entity)) {
                Some(exclude_idx) => {
                    exclude_hits[exclude_idx] += 1;
                    annotations.insert(key.clone(), format!("exclude: {}", excludes[exclude_idx]));
                    excluded.push(key);
                }
                None => {
                    annotations.insert(key.clone(), format!("include: {}", includes[include_idx]));
                    matched.push(key);
                }
            }
        }

        let mut warnings = Vec::new();
        if includes.is_empty() {
            warnings.push("No include patterns supplied; nothing will be scanned".to_string());
        }
        for (pattern, hits) in includes.iter().zip(&include_hits) {
            if *hits == 0 {
                warnings.push(format!("Include pattern '{}' matched no entities", pattern));
            }
        }
        for (pattern, hits) in excludes.iter().zip(&exclude_hits) {
            if *hits == 0 {
                warnings.push(format!("Exclude pattern '{}' matched no entities", pattern));
            }
        }
        if matched.is_empty() && !excluded.is_empty() {
            warnings.push("Every matched entity is excluded".to_string());
        }

        log::debug!(
            "Validated rule set {} against {}: {} included, {} excluded of {}",
            request.rule_set_id,
            request.data_source_id,
            matched.len(),
            excluded.len(),
            self.entities.len()
        );

        Ok(PatternValidationResult {
            total_entities: self.entities.len(),
            included_count: matched.len(),
            excluded_count: excluded.len(),
            matched_entities: matched,
            excluded_entities: excluded,
            entity_annotations: annotations,
            warnings,
            validated_at: Utc::now(),
        })
    }
}
