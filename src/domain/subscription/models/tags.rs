/// Tag every freshly created subscriber receives before any request tag.
pub const NEW_SUBSCRIBER_TAG: &str = "new";

/// Tag recording which lead-magnet resource brought the subscriber in.
pub fn resource_tag(resource_id: &str) -> String {
    format!("resource-{}", resource_id)
}

/// Splits a comma separated tag list as submitted by the public forms.
/// Blank entries are dropped.
pub fn split_tags(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(String::from)
        .collect()
}

/// Tags applied to a subscriber that was just created: `"new"` first, then
/// the request tags.
pub fn tags_for_new_subscriber(request_tags: &[String]) -> Vec<String> {
    let all = std::iter::once(NEW_SUBSCRIBER_TAG.to_string()).chain(request_tags.iter().cloned());
    dedup_preserving_order(all)
}

/// Tags applied to a subscriber that already existed.
pub fn tags_for_existing_subscriber(request_tags: &[String]) -> Vec<String> {
    dedup_preserving_order(request_tags.iter().cloned())
}

fn dedup_preserving_order(tags: impl Iterator<Item = String>) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    tags.filter(|t| seen.insert(t.clone())).collect()
}
