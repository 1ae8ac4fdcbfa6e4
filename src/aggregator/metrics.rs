//! Hot call paths into the target symbol.
//!
//! Hot paths are the calling contexts that accumulated the most sampled
//! weight at the target; they are the first places to look when the
//! target is a contended lock.

use super::stack_builder::CollapsedStack;
use crate::output::schema::HotPath;
use log::debug;

/// Calculate hot paths from collapsed stacks
///
/// # Arguments
/// * `stacks` - Collapsed stacks from stack_builder, heaviest first
/// * `total_weight` - Weight at the target symbol (the graph root)
/// * `top_n` - Number of top paths to return
///
/// # Returns
/// Vector of hot paths, sorted by weight (descending)
pub fn calculate_hot_paths(stacks: &[CollapsedStack], total_weight: u64, top_n: usize) -> Vec<HotPath> {
    debug!("Calculating top {} hot paths from {} stacks", top_n, stacks.len());

    stacks
        .iter()
        .take(top_n)
        .map(|stack| create_hot_path(stack, total_weight))
        .collect()
}

/// Create a HotPath from a CollapsedStack
pub fn create_hot_path(stack: &CollapsedStack, total_weight: u64) -> HotPath {
    let percentage = if total_weight > 0 {
        (stack.weight as f64 / total_weight as f64) * 100.0
    } else {
        0.0
    };

    HotPath {
        stack: stack.stack.clone(),
        weight: stack.weight,
        percentage,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_calculate_hot_paths() {
        let stacks = vec![
            CollapsedStack::new("main;execute;foo".to_string(), 5000),
            CollapsedStack::new("main;storage;foo".to_string(), 3000),
            CollapsedStack::new("main;compute;foo".to_string(), 2000),
        ];

        let hot_paths = calculate_hot_paths(&stacks, 10000, 2);

        assert_eq!(hot_paths.len(), 2);
        assert_eq!(hot_paths[0].stack, "main;execute;foo");
        assert_eq!(hot_paths[0].weight, 5000);
        assert_eq!(hot_paths[0].percentage, 50.0);
    }

    #[test]
    fn test_create_hot_path_zero_total() {
        let stack = CollapsedStack::new("foo".to_string(), 0);
        assert_eq!(create_hot_path(&stack, 0).percentage, 0.0);
    }
}
