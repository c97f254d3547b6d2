//! # Member-Side Realization
//!
//! Realizers apply an element to one member's live runtime. They run once per
//! targeted member, inside that member, and report every failure as a failed
//! [`RealizationResult`] so one member's problem never aborts the others.
//!
//! `exists` is side-effect free, and `create` either builds the whole live
//! object or nothing, so a successful `exists` always has a matching `get`.
//!
//! In-place update and removal are not supported by the bundled realizers;
//! the trait's defaults report them as [`RealizerError::NotImplemented`].

pub mod function;
mod gateway_receiver_realizer;
mod region_realizer;
pub mod runtime;

pub use function::{CacheElementFunction, RealizationRequest};
pub use gateway_receiver_realizer::GatewayReceiverRealizer;
pub use region_realizer::RegionRealizer;
pub use runtime::{
    CacheRuntime, GatewayReceiverSettings, InMemoryCache, LiveGatewayReceiver, LiveRegion,
    RuntimeError,
};

pub use crate::model::CacheElementOperation;

use crate::errors::RealizerError;
use crate::model::{ConfigurationElement, ElementId, ElementType, RealizationResult};

pub trait ConfigurationRealizer: Send + Sync {
    fn element_type(&self) -> ElementType;

    fn create(&self, element: &ConfigurationElement, runtime: &dyn CacheRuntime)
        -> RealizationResult;

    fn exists(&self, id: &ElementId, runtime: &dyn CacheRuntime) -> bool;

    fn get(&self, id: &ElementId, runtime: &dyn CacheRuntime) -> Option<ConfigurationElement>;

    fn update(
        &self,
        _element: &ConfigurationElement,
        _runtime: &dyn CacheRuntime,
    ) -> Result<RealizationResult, RealizerError> {
        Err(RealizerError::NotImplemented {
            operation: CacheElementOperation::Update,
            element_type: self.element_type(),
        })
    }

    fn delete(
        &self,
        _id: &ElementId,
        _runtime: &dyn CacheRuntime,
    ) -> Result<RealizationResult, RealizerError> {
        Err(RealizerError::NotImplemented {
            operation: CacheElementOperation::Delete,
            element_type: self.element_type(),
        })
    }
}

pub(crate) fn wrong_element_type(expected: ElementType, actual: ElementType) -> RealizationResult {
    RealizationResult::failure(format!(
        "{expected} realizer cannot realize a {actual} element"
    ))
}
