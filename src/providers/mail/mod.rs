//! Mail relay client and recipient validation.

mod relay;

pub use relay::{
    filter_recipients, is_valid_address, render_summary_html, MailRelayClient, SendError,
    SendResult,
};
