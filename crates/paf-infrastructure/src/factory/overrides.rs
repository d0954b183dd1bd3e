//! Per-invocation resolver overrides

use std::fmt;
use std::sync::Arc;

use paf_domain::error::Result;
use paf_domain::ports::{OverrideContext, ResolverOverride};
use paf_domain::value_objects::{Instance, TypeKey};

use super::TargetOverrideMatcher;

/// Supplies one factory argument to the product's constructor
///
/// Consulted by the host for every dependency it resolves while an invocation
/// is in flight, but contributes only to the constructor of the product (or of
/// a concrete type mapped to it) and only for the parameter of its type.
/// Nested dependencies resolve normally.
pub struct ParameterByTypeOverride {
    matcher: TargetOverrideMatcher,
    value: Instance,
}

impl ParameterByTypeOverride {
    /// Override `parameter` with `value` while constructing `target`
    pub fn new(target: TypeKey, parameter: TypeKey, value: Instance) -> Self {
        Self {
            matcher: TargetOverrideMatcher::new(target, parameter),
            value,
        }
    }

    /// The target/parameter pair this override applies to
    pub fn matcher(&self) -> &TargetOverrideMatcher {
        &self.matcher
    }
}

impl ResolverOverride for ParameterByTypeOverride {
    fn resolve(
        &self,
        context: &dyn OverrideContext,
        dependency: TypeKey,
    ) -> Result<Option<Instance>> {
        if !self.matcher.target_type_matches(context.target(), context)
            || !self.matcher.parameter_type_matches(dependency)
        {
            return Ok(None);
        }

        // Hosts that cannot name the constructor skip the ambiguity check
        if let Some(constructor) = context.selected_constructor() {
            self.matcher
                .ensure_single_parameter_of_overridden_type(constructor)?;
        }

        Ok(Some(Arc::clone(&self.value)))
    }
}

impl fmt::Debug for ParameterByTypeOverride {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParameterByTypeOverride")
            .field("target", &self.matcher.target())
            .field("parameter", &self.matcher.parameter())
            .finish_non_exhaustive()
    }
}
