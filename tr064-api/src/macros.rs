//! Declarative macro for typed action definitions

/// Define a typed TR-064 action
///
/// Generates a request struct with one public field per input argument, its
/// [`Tr064Action`](crate::Tr064Action) implementation and a snake-case
/// constructor function.
///
/// # Example
/// ```rust
/// use tr064_api::define_action;
///
/// define_action! {
///     action: SetSwitch,
///     service: "Homeauto",
///     name: "SetSwitch",
///     request: {
///         ain: String => "NewAIN",
///         switch_state: String => "NewSwitchState",
///     },
///     response: (),
/// }
///
/// use tr064_api::Tr064Action;
/// let request = set_switch("087610006161".to_string(), "ON".to_string());
/// let arguments = request.arguments();
/// assert_eq!(arguments.names().collect::<Vec<_>>(), vec!["NewAIN", "NewSwitchState"]);
/// ```
#[macro_export]
macro_rules! define_action {
    (
        action: $action_struct:ident,
        service: $service:literal,
        name: $action:literal,
        request: {
            $($field:ident: $field_type:ty => $wire:literal),* $(,)?
        },
        response: $response_type:ty $(,)?
    ) => {
        $crate::paste::paste! {
            #[derive(Debug, Clone, PartialEq)]
            pub struct $action_struct {
                $(pub $field: $field_type,)*
            }

            impl $crate::Tr064Action for $action_struct {
                type Output = $response_type;

                const SERVICE: &'static str = $service;
                const ACTION: &'static str = $action;

                fn arguments(&self) -> $crate::Arguments {
                    #[allow(unused_mut)]
                    let mut arguments = $crate::Arguments::new();
                    $(arguments.insert($wire, &self.$field);)*
                    arguments
                }
            }

            pub fn [<$action_struct:snake>]($($field: $field_type),*) -> $action_struct {
                $action_struct {
                    $($field,)*
                }
            }
        }
    };
}
