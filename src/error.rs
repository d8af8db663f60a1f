use thiserror::Error;

/// Errors from accessing a [ViewModel](crate::ViewModel) by property name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ViewModelError {
    /// Only properties the data had when the view model was created are proxied
    #[error("`{0}` is not a data property of this view model")]
    UnknownProperty(String)
}
