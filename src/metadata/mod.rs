//! Model field metadata: which fields are filterable, under which query
//! parameter, with which logical type.
//!
//! A model describes itself through [`FilterModel`], normally via
//! `#[derive(FilterModel)]`. Each field is either undeclared (not
//! filterable), disabled, or declared with optional overrides:
//!
//! | Declaration | External parameter | Logical type |
//! |---|---|---|
//! | *(none)* | not filterable | |
//! | `-` | not filterable | |
//! | `""` | field name | `default` |
//! | `type:string` | field name | `string` |
//! | `param:clickCount;type:number` | `clickCount` | `number` |

pub mod cache;
pub mod declaration;
pub mod descriptor;

pub use cache::{FieldFilterConfig, FieldMetadataCache, ModelFilterConfig, derive_model_config};
pub use declaration::{FieldDeclaration, LogicalType};
pub use descriptor::{FilterAnnotation, FilterModel, ModelDescriptor, StructuralField};
