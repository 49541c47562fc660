/// Ordering of a policy's sort keys for display.

/// Order sort keys with every `STATE` key first, then the rest.
///
/// Both groups are sorted lexically on their own. Inputs with fewer than two
/// keys are returned untouched.
#[must_use]
pub fn order_sort_keys(sort_keys: Vec<String>) -> Vec<String> {
    if sort_keys.len() < 2 {
        return sort_keys;
    }

    let (mut state_keys, mut other_keys): (Vec<String>, Vec<String>) = sort_keys
        .into_iter()
        .partition(|sk| sk.contains(super::STATE_SORT_KEY));

    state_keys.sort();
    other_keys.sort();

    state_keys.extend(other_keys);
    state_keys
}
