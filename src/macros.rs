/// Generates the get/set/reset triple for each sub-field of a [`Shape`](crate::Shape).
///
/// Primitive sub-fields must be [`Slot`](crate::Slot)s, nested ones
/// [`WrappedField`](crate::WrappedField)s listed under `nested`.
#[macro_export]
macro_rules! field_accessors {
    (
        impl [$($gen:tt)*] $shape:ty {
            $( $name:ident : $ty:ty => $set:ident, $reset:ident; )*
        }
        $( nested {
            $( $child:ident : $child_ty:ty => $child_set:ident, $child_reset:ident; )*
        } )?
    ) => {
        impl<$($gen)*> $crate::WrappedField<$shape> {
            $(
                pub fn $name(&self) -> $crate::Result<$ty> {
                    self.read(|fields| fields.$name.get())
                }

                pub fn $set(&self, value: $ty) -> $crate::Result<()> {
                    self.write(stringify!($name), |fields| fields.$name.set(value))
                }

                pub fn $reset(&self) -> $crate::Result<()> {
                    let value = self.default().$name()?;
                    self.$set(value)
                }
            )*

            $($(
                pub fn $child(&self) -> $crate::Result<&$child_ty> {
                    self.nested(|fields| &fields.$child)
                }

                pub fn $child_set(&self, value: &$child_ty) -> $crate::Result<()> {
                    self.write_nested(stringify!($child), |fields| &fields.$child, value)
                }

                pub fn $child_reset(&self) -> $crate::Result<()> {
                    let default = self.default();
                    self.$child_set(default.$child()?)
                }
            )*)?
        }
    };
}
