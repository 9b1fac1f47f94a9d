//! Declaration macros for node types.
//!
//! A node type is a struct of `Option<T>` fields, one per declared attribute,
//! plus an [`crate::Extension`] for everything else. Writing the by-name
//! lookup, validation and serialization for every field by hand would be
//! tedious and easy to get out of sync, so the field table is written once:
//!
//! ```ignore
//! schema! {
//!     pub struct Tpl: "tpl" extends NodeBase {
//!         class_name: String => "className",
//!         tpl: Template => "tpl",
//!     }
//! }
//! ```
//!
//! Each row is `internal_name: Type => "wireName"`. `extends` embeds a shared
//! attribute group (declared with `attribute_group!`) as a `base` field whose
//! attributes come first in lookups and documents.

/// Generates the attribute table and the by-name plumbing for a struct.
macro_rules! declare_attributes {
    (
        $name:ident $(extends $base:ident)? {
            $( $field:ident : $fty:ty => $wire:literal ),*
        }
    ) => {
        impl $name {
            const DECLARED: &'static [$crate::attributes::AttributeSpec] = &[
                $(
                    $crate::attributes::AttributeSpec::new(
                        stringify!($field),
                        $wire,
                        <$fty as $crate::attributes::AttrType>::KIND,
                    ),
                )*
            ];

            pub(crate) fn declared_specs() -> Vec<&'static $crate::attributes::AttributeSpec> {
                #[allow(unused_mut)]
                let mut specs = Vec::new();
                $( specs.extend(<$base>::declared_specs()); )?
                specs.extend(Self::DECLARED.iter());
                specs
            }

            /// `Some(value)` if `name` is declared here, `None` otherwise.
            #[allow(unused_variables)]
            pub(crate) fn lookup(
                &self,
                name: &str,
            ) -> Option<Option<$crate::attributes::AttrValue>> {
                $(
                    if let Some(found) = <$base>::lookup(&self.base, name) {
                        return Some(found);
                    }
                )?
                $(
                    if name == stringify!($field) || name == $wire {
                        return Some(
                            self.$field
                                .as_ref()
                                .map(<$fty as $crate::attributes::AttrType>::to_attr),
                        );
                    }
                )*
                None
            }

            #[allow(unused_variables)]
            pub(crate) fn assign(
                &mut self,
                name: &str,
                value: $crate::attributes::AttrValue,
            ) -> $crate::error::Result<$crate::schema::Assign> {
                $(
                    let value = match <$base>::assign(&mut self.base, name, value)? {
                        $crate::schema::Assign::Done => return Ok($crate::schema::Assign::Done),
                        $crate::schema::Assign::Undeclared(value) => value,
                    };
                )?
                $(
                    if name == stringify!($field) || name == $wire {
                        self.$field = $crate::attributes::decode::<$fty>($wire, value)?;
                        return Ok($crate::schema::Assign::Done);
                    }
                )*
                Ok($crate::schema::Assign::Undeclared(value))
            }

            #[allow(unused_variables)]
            pub(crate) fn write_declared(
                &self,
                doc: &mut serde_json::Map<String, serde_json::Value>,
            ) -> $crate::error::Result<()> {
                $( <$base>::write_declared(&self.base, doc)?; )?
                $(
                    if let Some(value) = &self.$field {
                        let json = $crate::document::ToDocument::to_document(value)
                            .map_err(|err| err.at($wire))?;
                        doc.insert($wire.to_string(), json);
                    }
                )*
                Ok(())
            }
        }
    };
}

/// A group of declared attributes shared by several node types.
///
/// The group has no extension map and is not a node by itself; node types
/// embed it with `extends`.
macro_rules! attribute_group {
    (
        $(#[$meta:meta])*
        pub struct $name:ident {
            $( $(#[$fmeta:meta])* $field:ident : $fty:ty => $wire:literal ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Default, PartialEq)]
        pub struct $name {
            $( $(#[$fmeta])* pub $field: Option<$fty>, )*
        }

        declare_attributes!($name { $( $field : $fty => $wire ),* });
    };
}

/// Declares a node type and implements [`crate::Schema`] and
/// [`serde::Serialize`] for it.
///
/// `Default` is left to the caller, since most node types have non-empty
/// defaults (a `type` tag, `dataType: "json"`, ...).
macro_rules! schema {
    (
        $(#[$meta:meta])*
        pub struct $name:ident $(: $tag:literal)? $(extends $base:ident)? {
            $( $(#[$fmeta:meta])* $field:ident : $fty:ty => $wire:literal ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq)]
        pub struct $name {
            $( pub base: $base, )?
            $( $(#[$fmeta])* pub $field: Option<$fty>, )*
            /// Undeclared attributes, emitted after the declared ones.
            pub extra: $crate::attributes::Extension,
        }

        declare_attributes!($name $(extends $base)? { $( $field : $fty => $wire ),* });

        $(
            impl $name {
                /// The amis `type` this struct stands for.
                pub const TAG: &'static str = $tag;
            }
        )?

        impl $crate::schema::Schema for $name {
            fn type_tag(&self) -> Option<&'static str> {
                None $( .or(Some($tag)) )?
            }

            fn attributes(&self) -> Vec<&'static $crate::attributes::AttributeSpec> {
                Self::declared_specs()
            }

            fn get(&self, name: &str) -> Option<$crate::attributes::AttrValue> {
                match self.lookup(name) {
                    Some(declared) => declared,
                    None => self.extra.get(name).cloned(),
                }
            }

            fn set(
                &mut self,
                name: &str,
                value: $crate::attributes::AttrValue,
            ) -> $crate::error::Result<()> {
                if let $crate::schema::Assign::Undeclared(value) = self.assign(name, value)? {
                    tracing::trace!(
                        node = stringify!($name),
                        attribute = name,
                        "storing extension attribute"
                    );
                    self.extra.insert(name, value);
                }
                Ok(())
            }

            fn extension(&self) -> &$crate::attributes::Extension {
                &self.extra
            }

            fn extension_mut(&mut self) -> &mut $crate::attributes::Extension {
                &mut self.extra
            }

            fn to_document(&self) -> $crate::error::Result<serde_json::Value> {
                let mut doc = serde_json::Map::new();
                self.write_declared(&mut doc)?;
                self.extra.write(&mut doc)?;
                Ok(serde_json::Value::Object(doc))
            }

            fn clone_node(&self) -> $crate::schema::AnyNode {
                $crate::schema::AnyNode::new(self.clone())
            }

            fn as_any(&self) -> &dyn std::any::Any {
                self
            }

            fn as_any_mut(&mut self) -> &mut dyn std::any::Any {
                self
            }

            fn into_any(self: Box<Self>) -> Box<dyn std::any::Any> {
                self
            }
        }

        impl serde::Serialize for $name {
            fn serialize<S: serde::Serializer>(
                &self,
                serializer: S,
            ) -> std::result::Result<S::Ok, S::Error> {
                let doc = $crate::schema::Schema::to_document(self)
                    .map_err(serde::ser::Error::custom)?;
                serde::Serialize::serialize(&doc, serializer)
            }
        }
    };
}

/// Sets attributes by internal name on any node.
///
/// Expands to [`crate::Update::update_from_fields`], so it validates the same
/// way, stops at the first invalid value and returns the node for chaining.
///
/// ```ignore
/// amiskit::update!(tpl, id = "greeting", visible_on = "${show}")?;
/// ```
#[macro_export]
macro_rules! update {
    ($node:expr, $( $key:ident = $value:expr ),+ $(,)?) => {{
        use $crate::Update as _;
        ($node).update_from_fields([
            $( (stringify!($key), $crate::AttrValue::from($value)) ),+
        ])
    }};
}
