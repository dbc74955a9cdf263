use async_trait::async_trait;

use crate::error::Result;

/// Physical-namespace suffix for ordered-collection keys.
pub const SUFFIX: &str = "ZSET";

/// A remote ordered collection where each member carries a numeric score.
///
/// Members are unique by value: re-adding an existing member updates its
/// score instead of inserting a duplicate. Ranges always return members in
/// ascending score order, ties broken lexically by member.
#[async_trait]
pub trait SortedSetStore: Send + Sync {
    /// Insert or update one member. Returns the number of members that did
    /// not exist before the write.
    async fn add_member(&self, key: &str, member: &str, score: f64) -> Result<u64>;

    /// Full range of members, scores omitted.
    async fn range(&self, key: &str) -> Result<Vec<String>>;

    /// Full range of members paired with their scores.
    async fn range_with_scores(&self, key: &str) -> Result<Vec<(String, f64)>>;

    /// Full range in descending score order.
    async fn rev_range(&self, key: &str) -> Result<Vec<String>>;

    /// Remove members. Returns the number of members removed.
    async fn remove_members(&self, key: &str, members: &[String]) -> Result<u64>;

    /// Score of a single member, if present.
    async fn member_score(&self, key: &str, member: &str) -> Result<Option<f64>>;
}
