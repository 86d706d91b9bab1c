// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Group Filter Resolver
//!
//! Narrows the group catalog to the groups a search term points at, so that
//! filtered retrieval can include every member of a matching group.

use crate::domain::endpoint_group::EndpointGroup;

/// Groups whose name or any tag contains `filter`, in catalog order.
///
/// `filter` must be non-empty and already lower-cased; the comparison
/// lower-cases the group side.
pub fn filter_groups(groups: &[EndpointGroup], filter: &str) -> Vec<EndpointGroup> {
    groups
        .iter()
        .filter(|group| group.matches_filter(filter))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::endpoint_group::EndpointGroupId;

    fn catalog() -> Vec<EndpointGroup> {
        vec![
            EndpointGroup::new(EndpointGroupId(1), "Production").with_tags(["prod", "east"]),
            EndpointGroup::new(EndpointGroupId(2), "Staging").with_tags(["dev"]),
            EndpointGroup::new(EndpointGroupId(3), "Edge Devices").with_tags(["IoT", "East-Coast"]),
        ]
    }

    fn ids(groups: &[EndpointGroup]) -> Vec<u32> {
        groups.iter().map(|g| g.id.0).collect()
    }

    #[test]
    fn test_name_match() {
        assert_eq!(ids(&filter_groups(&catalog(), "prod")), vec![1]);
    }

    #[test]
    fn test_tag_match_is_case_insensitive() {
        assert_eq!(ids(&filter_groups(&catalog(), "iot")), vec![3]);
    }

    #[test]
    fn test_preserves_catalog_order_without_duplicates() {
        // "east" hits group 1 through a tag and group 3 through another tag
        assert_eq!(ids(&filter_groups(&catalog(), "east")), vec![1, 3]);
        // group 3 matches by name and tag but appears once
        assert_eq!(ids(&filter_groups(&catalog(), "e")), vec![1, 2, 3]);
    }

    #[test]
    fn test_no_match() {
        assert!(filter_groups(&catalog(), "zzz").is_empty());
    }

    #[test]
    fn test_output_is_subset_matching_predicate() {
        let groups = catalog();
        for filter in ["a", "st", "dev", "coast", "x"] {
            let matched = filter_groups(&groups, filter);
            for group in &groups {
                let expected = group.name.to_lowercase().contains(filter)
                    || group.tags.iter().any(|t| t.to_lowercase().contains(filter));
                assert_eq!(matched.contains(group), expected, "filter {filter} group {}", group.name);
            }
        }
    }
}
