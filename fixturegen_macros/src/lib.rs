//! Procedural macros for `fixturegen`.
//!
//! The [`dataset`] attribute marks a dataset definition. Generation itself
//! happens from the build script, which reads the attribute from source; the
//! macro only checks the attribute at compile time and leaves the item as it
//! was written.

use proc_macro::TokenStream;

mod expand;


/// Marks a type as a dataset definition.
///
/// ```ignore
/// #[fixturegen::dataset(entity = PurchaseContract, data_model = DataModel)]
/// pub struct PurchaseContractDataSet;
/// ```
///
/// Both keys are required and must name types. For non-generic definitions
/// the macro also asserts that `build(model: DataModel) -> PurchaseContract`
/// exists on the annotated type.
#[proc_macro_attribute]
pub fn dataset(attr: TokenStream, item: TokenStream) -> TokenStream {
    expand::expand(attr.into(), item.into())
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}
