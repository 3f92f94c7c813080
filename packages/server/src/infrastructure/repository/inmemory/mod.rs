//! インメモリ Repository 実装
//!
//! 単一プロセス内でのみ一貫性を保ちます。複数プロセスに分散させる場合は、
//! pub/sub を持つ共有ストアに置き換える必要があります。

pub mod identity;
pub mod membership;

pub use identity::InMemoryIdentityRepository;
pub use membership::InMemoryRoomMembershipRepository;
