pub mod acl;
pub mod connect;
pub mod consumer_group;
pub mod topic;
pub mod user;
