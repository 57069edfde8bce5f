//! Precedence ranking over canonical categories.

use crate::model::category::Category;
use crate::rules::ruleset::Ruleset;

impl Ruleset {
    /// Returns the precedence rank of `category`; lower is more senior.
    ///
    /// # Panics
    /// Panics when `category` has no precedence entry in this ruleset, which
    /// only happens when a category from another ruleset is passed in. That
    /// is a programmer error and must not be masked by a default rank.
    pub fn rank(&self, category: &Category) -> u32 {
        match self.try_rank(category) {
            Some(rank) => rank,
            None => panic!(
                "category `{category}` has no precedence entry in ruleset `{}`",
                self.name()
            ),
        }
    }

    /// Returns the precedence rank of `category`, or `None` when unranked.
    pub fn try_rank(&self, category: &Category) -> Option<u32> {
        self.precedence
            .iter()
            .find(|(candidate, _)| candidate == category)
            .map(|(_, rank)| *rank)
    }

    /// Returns the most senior category among `categories`.
    ///
    /// Returns `None` for an empty input. When two categories share a rank
    /// (only possible with a non-injective custom table), the one seen first
    /// wins.
    pub fn highest_title<'a, I>(&self, categories: I) -> Option<Category>
    where
        I: IntoIterator<Item = &'a Category>,
    {
        let mut best: Option<(&Category, u32)> = None;
        for category in categories {
            let rank = self.rank(category);
            match best {
                Some((_, best_rank)) if best_rank <= rank => {}
                _ => best = Some((category, rank)),
            }
        }
        best.map(|(category, _)| category.clone())
    }
}
