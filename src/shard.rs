//! Contiguous partitioning of the camera set for multi-process runs.

use crate::error::LoadError;

/// Returns shard `split_idx` of `items` split into `split_num` contiguous
/// parts.
///
/// The first `len % split_num` shards hold one extra item, so shard sizes
/// differ by at most one and their concatenation in index order reproduces
/// `items`.
pub fn split_by_index<T>(
    items: &[T],
    split_num: usize,
    split_idx: usize,
) -> Result<&[T], LoadError> {
    let len = items.len();
    let invalid = |reason| LoadError::InvalidShardParams {
        split_num,
        split_idx,
        len,
        reason,
    };
    if split_num == 0 || split_num > len {
        return Err(invalid(
            "split_num must be positive and not exceed the number of cameras",
        ));
    }
    if split_idx >= split_num {
        return Err(invalid("split_idx must be less than split_num"));
    }

    let base = len / split_num;
    let remain = len % split_num;
    let (begin, size) = if split_idx < remain {
        (split_idx * (base + 1), base + 1)
    } else {
        (remain * (base + 1) + (split_idx - remain) * base, base)
    };
    Ok(&items[begin..begin + size])
}

/// Every shard of `items`, in index order.
pub fn split_all<T>(items: &[T], split_num: usize) -> Result<Vec<&[T]>, LoadError> {
    if split_num == 0 || split_num > items.len() {
        return Err(LoadError::InvalidShardParams {
            split_num,
            split_idx: 0,
            len: items.len(),
            reason: "split_num must be positive and not exceed the number of cameras",
        });
    }
    (0..split_num)
        .map(|idx| split_by_index(items, split_num, idx))
        .collect()
}
