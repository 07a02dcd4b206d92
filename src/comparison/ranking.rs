//! Ranking

use smallvec::{SmallVec, smallvec};

/// Direction of a ranking.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub(crate) enum RankOrder {
    /// Largest key ranks first.
    Descending,

    /// Smallest key ranks first.
    Ascending,
}

/// Assign 1-based ranks to `values` by `key`, without reordering them.
///
/// The returned ranks line up with `values` by index. Equal keys keep their relative input
/// order, so the earlier value gets the better rank.
pub(crate) fn ranks_by<T, K, F>(values: &[T], order: RankOrder, key: F) -> SmallVec<[usize; 4]>
where
    K: Ord,
    F: Fn(&T) -> K,
{
    let mut positions: SmallVec<[(usize, K); 4]> =
        values.iter().map(key).enumerate().collect();

    // `sort_by` is stable, which keeps ties in input order.
    positions.sort_by(|(_, a), (_, b)| match order {
        RankOrder::Descending => b.cmp(a),
        RankOrder::Ascending => a.cmp(b),
    });

    let mut ranks: SmallVec<[usize; 4]> = smallvec![0; values.len()];

    for (position, (idx, _)) in positions.iter().enumerate() {
        if let Some(rank) = ranks.get_mut(*idx) {
            *rank = position + 1;
        }
    }

    ranks
}
