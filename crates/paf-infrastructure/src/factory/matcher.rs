//! Target/parameter matching for resolution-time overrides

use paf_domain::error::{Error, Result};
use paf_domain::ports::CapabilityQuery;
use paf_domain::value_objects::{ConstructorInfo, TypeKey};
use tracing::warn;

/// "When constructing `target`, substitute the dependency of type `parameter`"
///
/// `target` may be a capability (`dyn Trait`); it then matches every concrete
/// type the host mapped to that capability.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TargetOverrideMatcher {
    target: TypeKey,
    parameter: TypeKey,
}

impl TargetOverrideMatcher {
    /// Create a matcher for one override intent
    pub fn new(target: TypeKey, parameter: TypeKey) -> Self {
        Self { target, parameter }
    }

    /// Type whose construction is affected
    pub fn target(&self) -> TypeKey {
        self.target
    }

    /// Dependency type that gets substituted
    pub fn parameter(&self) -> TypeKey {
        self.parameter
    }

    /// Whether constructing `candidate` falls under this override
    pub fn target_type_matches<Q>(&self, candidate: TypeKey, capabilities: &Q) -> bool
    where
        Q: CapabilityQuery + ?Sized,
    {
        candidate == self.target || capabilities.implements(candidate, self.target)
    }

    /// Whether a dependency of type `candidate` is the overridden one
    pub fn parameter_type_matches(&self, candidate: TypeKey) -> bool {
        candidate == self.parameter
    }

    /// Reject constructors with several parameters of the overridden type
    ///
    /// With more than one there is no telling which the caller meant.
    pub fn ensure_single_parameter_of_overridden_type(
        &self,
        constructor: &ConstructorInfo,
    ) -> Result<()> {
        let count = constructor.count_parameters_of(self.parameter);
        if count > 1 {
            warn!(
                constructor = %constructor,
                parameter_type = %self.parameter,
                count,
                "Ambiguous parameter override"
            );
            return Err(Error::ambiguous_override(
                constructor.signature(),
                count,
                self.parameter.name(),
            ));
        }
        Ok(())
    }
}
