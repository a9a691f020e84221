//! Container synthesizer.
//!
//! Every container shape is sized uniformly in the configured range
//! (`[1, 5]` by default) and its elements are synthesized one budget level
//! down. Object elements are always built, so a container never comes back
//! short at a positive budget. At an exhausted budget the container is empty.

use super::ObjectSynthesizer;
use crate::config::MockConfig;
use mock_core::{ContainerShape, MockValue};
use rand::rngs::StdRng;
use rand::Rng;
use tracing::warn;

/// Synthesize a container value for `shape`.
///
/// Elements that come back `Null` (opaque shapes) are skipped, as are map
/// entries with a `Null` key or value. Duplicate map keys collapse with the
/// last value winning. Sets drop duplicate elements.
pub(crate) fn synthesize_container(
    synthesizer: &ObjectSynthesizer<'_>,
    shape: &ContainerShape,
    budget: i32,
    rng: &mut StdRng,
) -> MockValue {
    if !shape.is_resolved() {
        warn!("Container {} has unresolved component types, leaving it empty", shape.kind());
        return empty_container(shape);
    }
    if budget <= 0 {
        return empty_container(shape);
    }

    let child_budget = budget - 1;
    match shape {
        ContainerShape::Tuple2(first, second) => MockValue::tuple(
            synthesizer.synthesize_element(first, child_budget, rng),
            synthesizer.synthesize_element(second, child_budget, rng),
        ),
        ContainerShape::Map { key, value } => {
            let len = collection_len(synthesizer.config(), rng);
            let mut entries = Vec::with_capacity(len);
            for _ in 0..len {
                let k = synthesizer.synthesize_element(key, child_budget, rng);
                let v = synthesizer.synthesize_element(value, child_budget, rng);
                if k.is_null() || v.is_null() {
                    continue;
                }
                MockValue::insert_entry(&mut entries, k, v);
            }
            MockValue::Map(entries)
        }
        ContainerShape::Array(element)
        | ContainerShape::Sequence(element)
        | ContainerShape::Queue(element)
        | ContainerShape::Stack(element)
        | ContainerShape::Set(element) => {
            let unique = matches!(shape, ContainerShape::Set(_));
            let len = collection_len(synthesizer.config(), rng);
            let mut items = Vec::with_capacity(len);
            for _ in 0..len {
                let item = synthesizer.synthesize_element(element, child_budget, rng);
                if item.is_null() || (unique && items.contains(&item)) {
                    continue;
                }
                // Queues enqueue and stacks push in generation order
                items.push(item);
            }
            MockValue::Array(items)
        }
    }
}

/// Empty value of a container shape. A tuple has no empty form and is null.
pub(crate) fn empty_container(shape: &ContainerShape) -> MockValue {
    match shape {
        ContainerShape::Map { .. } => MockValue::Map(Vec::new()),
        ContainerShape::Tuple2(..) => MockValue::Null,
        _ => MockValue::Array(Vec::new()),
    }
}

/// Random collection length within the configured bounds.
pub(crate) fn collection_len(config: &MockConfig, rng: &mut StdRng) -> usize {
    let (min, max) = (config.collection.min, config.collection.max);
    if min >= max {
        return min;
    }
    rng.random_range(min..=max)
}
