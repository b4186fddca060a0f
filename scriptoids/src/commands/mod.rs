//! Command implementations, one module per subcommand.

mod link;
mod list;
mod new;
mod show;
mod unlink;

pub use link::cmd_link;
pub use list::cmd_list;
pub use new::cmd_new;
pub use show::cmd_show;
pub use unlink::cmd_unlink;

pub(crate) fn scriptoid_noun(count: usize) -> &'static str {
    if count == 1 {
        "scriptoid"
    } else {
        "scriptoids"
    }
}
