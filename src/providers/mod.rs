//! External collaborator clients: the generative-AI provider, the text
//! extraction backends, and the mail relay.

pub mod ai;
pub mod extraction;
pub mod mail;
