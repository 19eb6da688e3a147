//! Authored recipe patterns: named parts wired together by typed outputs.

use schematic_core::{
    AssetCode, CanonicalSignature, ConnectionGraph, ConnectionInfo, ConnectionTypeLookup, NodeInfo,
    PlacedDraft, ShapeLookup,
};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

use crate::RecipeError;

/// One output of a pattern part, feeding the part named `target`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PatternOutput {
    pub target: String,
    #[serde(rename = "type")]
    pub connection_type: AssetCode,
}

/// A draft in a pattern.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatternPart {
    pub code: AssetCode,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub outputs: Vec<PatternOutput>,
}

impl PatternPart {
    pub fn new(code: AssetCode) -> Self {
        Self {
            code,
            outputs: Vec::new(),
        }
    }

    pub fn with_output(mut self, target: impl Into<String>, connection_type: AssetCode) -> Self {
        self.outputs.push(PatternOutput {
            target: target.into(),
            connection_type,
        });
        self
    }
}

/// The `"pattern"` of a recipe document: part name → part.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SchematicPattern {
    parts: BTreeMap<String, PatternPart>,
}

impl SchematicPattern {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, part: PatternPart) -> Option<PatternPart> {
        self.parts.insert(name.into(), part)
    }

    pub fn get(&self, name: &str) -> Option<&PatternPart> {
        self.parts.get(name)
    }

    pub fn parts(&self) -> impl Iterator<Item = (&str, &PatternPart)> {
        self.parts.iter().map(|(name, part)| (name.as_str(), part))
    }

    pub fn len(&self) -> usize {
        self.parts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    /// Derive a pattern from placed drafts.
    ///
    /// Parts are named after the first character of the draft path plus a
    /// counter per character (`p0`, `p1`, `t0`...), in placement order.
    pub fn from_layout<S: ShapeLookup + ?Sized>(drafts: &[PlacedDraft], shapes: &S) -> Self {
        let graph = ConnectionGraph::build(drafts, shapes);
        let mut counters: HashMap<char, u32> = HashMap::new();
        let names: Vec<String> = drafts
            .iter()
            .map(|draft| {
                let initial = draft.code.initial();
                let counter = counters.entry(initial).or_insert(0);
                let name = format!("{initial}{counter}");
                *counter += 1;
                name
            })
            .collect();

        let mut parts: Vec<PatternPart> = drafts
            .iter()
            .map(|draft| PatternPart::new(draft.code.clone()))
            .collect();
        for edge in graph.edges() {
            parts[edge.from].outputs.push(PatternOutput {
                target: names[edge.to].clone(),
                connection_type: edge.connection_type.clone(),
            });
        }
        for part in &mut parts {
            part.outputs.sort();
        }

        Self {
            parts: names.into_iter().zip(parts).collect(),
        }
    }

    /// Give unqualified codes the document's `domain`.
    pub fn qualify(&mut self, domain: &str) {
        for part in self.parts.values_mut() {
            part.code.qualify(domain);
            for output in &mut part.outputs {
                output.connection_type.qualify(domain);
            }
        }
    }

    /// Check every part and output against the registries.
    pub fn validate<D, C>(&self, drafts: &D, connection_types: &C) -> Vec<RecipeError>
    where
        D: ShapeLookup + ?Sized,
        C: ConnectionTypeLookup + ?Sized,
    {
        if self.parts.is_empty() {
            return vec![RecipeError::EmptyPattern];
        }
        let mut errors = Vec::new();
        for (name, part) in &self.parts {
            if !drafts.has_draft(&part.code) {
                errors.push(RecipeError::UnknownDraft {
                    part: name.clone(),
                    code: part.code.clone(),
                });
                continue;
            }
            for (index, output) in part.outputs.iter().enumerate() {
                if output.target.is_empty() || !self.parts.contains_key(&output.target) {
                    errors.push(RecipeError::DanglingOutputTarget {
                        part: name.clone(),
                        output: index,
                        target: output.target.clone(),
                    });
                }
                if !connection_types.has_connection_type(&output.connection_type) {
                    errors.push(RecipeError::UnknownConnectionType {
                        part: name.clone(),
                        output: index,
                        connection_type: output.connection_type.clone(),
                    });
                }
            }
        }
        errors
    }

    /// Canonical signature of the pattern. Outputs with a dangling target are skipped.
    pub fn signature(&self) -> CanonicalSignature {
        let nodes = self
            .parts
            .values()
            .map(|part| NodeInfo::new(part.code.clone(), part.outputs.len() as u32))
            .collect();
        let connections = self
            .parts
            .values()
            .flat_map(|part| {
                part.outputs.iter().filter_map(move |output| {
                    let target = self.parts.get(&output.target)?;
                    Some(ConnectionInfo::new(
                        part.code.clone(),
                        target.code.clone(),
                        output.connection_type.clone(),
                    ))
                })
            })
            .collect();
        CanonicalSignature::from_parts(nodes, connections)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use schematic_core::{Connection, DraftShape, ShapeCell};
    use serde_json::json;
    use std::collections::HashSet;

    fn code(path: &str) -> AssetCode {
        AssetCode::new("drafts", path)
    }

    fn shapes() -> HashMap<AssetCode, DraftShape> {
        let cell = |conns| ShapeCell::with_connections(0, 0, conns);
        let mut map = HashMap::new();
        map.insert(
            code("pump"),
            DraftShape::new(
                vec![cell([None, Some(Connection::output(code("water"))), None, None])],
                1,
                1,
                code("pump"),
                u32::MAX,
            )
            .unwrap(),
        );
        map.insert(
            code("tank"),
            DraftShape::new(
                vec![cell([None, None, None, Some(Connection::input(code("water")))])],
                1,
                1,
                code("tank"),
                u32::MAX,
            )
            .unwrap(),
        );
        map
    }

    fn water_types() -> HashSet<AssetCode> {
        HashSet::from([code("water")])
    }

    #[test]
    fn parses_pattern_json() {
        let pattern: SchematicPattern = serde_json::from_value(json!({
            "p0": { "code": "drafts:pump", "outputs": [{ "target": "t0", "type": "drafts:water" }] },
            "t0": { "code": "drafts:tank" }
        }))
        .unwrap();
        assert_eq!(pattern.len(), 2);
        assert_eq!(pattern.get("p0").unwrap().outputs[0].target, "t0");
        assert!(pattern.validate(&shapes(), &water_types()).is_empty());
    }

    #[test]
    fn validate_reports_every_problem() {
        let mut pattern = SchematicPattern::new();
        pattern.insert(
            "p0",
            PatternPart::new(code("pump"))
                .with_output("x9", code("water"))
                .with_output("t0", code("steam")),
        );
        pattern.insert("t0", PatternPart::new(code("tank")));
        pattern.insert("g0", PatternPart::new(code("ghost")));

        let errors = pattern.validate(&shapes(), &water_types());
        assert_eq!(errors.len(), 3, "{errors:?}");
        assert!(errors.contains(&RecipeError::UnknownDraft {
            part: "g0".into(),
            code: code("ghost")
        }));
        assert!(errors.contains(&RecipeError::DanglingOutputTarget {
            part: "p0".into(),
            output: 0,
            target: "x9".into()
        }));
        assert!(errors.contains(&RecipeError::UnknownConnectionType {
            part: "p0".into(),
            output: 1,
            connection_type: code("steam")
        }));
    }

    #[test]
    fn empty_pattern_is_invalid() {
        assert_eq!(
            SchematicPattern::new().validate(&shapes(), &water_types()),
            vec![RecipeError::EmptyPattern]
        );
    }

    #[test]
    fn qualify_fills_missing_domains() {
        let mut pattern: SchematicPattern = serde_json::from_value(json!({
            "p0": { "code": "pump", "outputs": [{ "target": "t0", "type": "water" }] },
            "t0": { "code": "other:tank" }
        }))
        .unwrap();
        pattern.qualify("drafts");
        assert_eq!(pattern.get("p0").unwrap().code, code("pump"));
        assert_eq!(pattern.get("p0").unwrap().outputs[0].connection_type, code("water"));
        assert_eq!(pattern.get("t0").unwrap().code, AssetCode::new("other", "tank"));
    }

    #[test]
    fn from_layout_names_parts_and_matches_layout_signature() {
        let shapes = shapes();
        let drafts = vec![
            PlacedDraft::new(code("pump"), (0, 0), 0),
            PlacedDraft::new(code("tank"), (1, 0), 0),
            PlacedDraft::new(code("pump"), (0, 2), 0),
        ];
        let pattern = SchematicPattern::from_layout(&drafts, &shapes);
        let names: Vec<&str> = pattern.parts().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["p0", "p1", "t0"]);
        assert_eq!(pattern.get("p0").unwrap().outputs.len(), 1);
        assert!(pattern.get("p1").unwrap().outputs.is_empty());
        assert_eq!(
            pattern.signature(),
            schematic_core::build_signature(&drafts, &shapes)
        );
    }
}
