use std::collections::HashSet;

use crate::assets::manifest::BodyManifest;
use crate::core::body::{BodyId, BodyParams};
use crate::error::{OrreryError, OrreryResult};

/// Validated, immutable table of body parameters.
///
/// Construction fails fast on any bad entry, so nothing downstream
/// (integrator, path builder, camera focus) has to re-check invariants.
#[derive(Debug, Clone)]
pub struct BodyTable {
    bodies: Vec<BodyParams>,
}

impl BodyTable {
    pub fn new(bodies: Vec<BodyParams>) -> OrreryResult<Self> {
        if bodies.is_empty() {
            return Err(OrreryError::EmptyTable);
        }
        let mut seen = HashSet::with_capacity(bodies.len());
        for body in &bodies {
            body.validate()?;
            if !seen.insert(body.name.to_lowercase()) {
                return Err(OrreryError::DuplicateBody(body.name.clone()));
            }
        }
        Ok(Self { bodies })
    }

    /// Build a table from a parsed manifest.
    pub fn from_manifest(manifest: BodyManifest) -> OrreryResult<Self> {
        Self::new(manifest.bodies)
    }

    /// Parse and validate a JSON manifest in one step.
    pub fn from_json(json: &str) -> OrreryResult<Self> {
        Self::from_manifest(BodyManifest::from_json(json)?)
    }

    pub fn get(&self, id: BodyId) -> Option<&BodyParams> {
        self.bodies.get(id.0 as usize)
    }

    /// Case-insensitive lookup by name.
    pub fn find(&self, name: &str) -> Option<BodyId> {
        self.bodies
            .iter()
            .position(|b| b.name.eq_ignore_ascii_case(name))
            .map(|i| BodyId(i as u32))
    }

    pub fn iter(&self) -> impl Iterator<Item = (BodyId, &BodyParams)> {
        self.bodies
            .iter()
            .enumerate()
            .map(|(i, b)| (BodyId(i as u32), b))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.bodies.iter().map(|b| b.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }
}
