pub trait Peripheral {
    fn take() -> Option<Self>
    where
        Self: Sized;
    unsafe fn steal() -> Self;
}

/// Declare a singleton for a generated SCI UART instance.
///
/// `sci_instance!(VoiceUart, 0)` binds `VoiceUart` to the `g_uart0_ctrl` and
/// `g_uart0_cfg` symbols emitted by the FSP configurator.
#[macro_export]
macro_rules! sci_instance {
    ($name:ident, $n:literal) => {
        $crate::paste::paste! {
            $crate::sci_instance!($name, $n, [<g_uart $n _ctrl>], [<g_uart $n _cfg>]);
        }
    };

    // E.g. sci_instance!(VoiceUart, 0, g_uart0_ctrl, g_uart0_cfg);
    ($name:ident, $n:expr, $ctrl:ident, $cfg:ident) => {
        pub struct $name {
            _private: (),
        }

        const _: () = {
            #[allow(non_upper_case_globals)]
            extern "C" {
                static mut $ctrl: $crate::fsp::uart_ctrl_t;
                static $cfg: $crate::fsp::uart_cfg_t;
            }

            static mut TAKEN: bool = false;

            impl $crate::Peripheral for $name {
                fn take() -> Option<Self> {
                    $crate::__critical_section::with(|_| unsafe {
                        if TAKEN {
                            None
                        } else {
                            TAKEN = true;
                            Some(Self { _private: () })
                        }
                    })
                }

                unsafe fn steal() -> Self {
                    Self { _private: () }
                }
            }

            impl $crate::SciInstance for $name {
                fn ctrl(&self) -> *mut $crate::fsp::uart_ctrl_t {
                    unsafe { core::ptr::addr_of_mut!($ctrl) }
                }

                fn cfg(&self) -> &'static $crate::fsp::uart_cfg_t {
                    unsafe { &*core::ptr::addr_of!($cfg) }
                }

                fn number(&self) -> u8 {
                    $n
                }
            }
        };
    };
}

/// Declare a singleton for a generated GPT timer instance.
///
/// `gpt_instance!(PwmTimer, g_timer)` binds `PwmTimer` to the `g_timer_ctrl`
/// and `g_timer_cfg` symbols emitted by the FSP configurator.
#[macro_export]
macro_rules! gpt_instance {
    ($name:ident, $instance:ident) => {
        $crate::paste::paste! {
            $crate::gpt_instance!($name, [<$instance _ctrl>], [<$instance _cfg>]);
        }
    };

    ($name:ident, $ctrl:ident, $cfg:ident) => {
        pub struct $name {
            _private: (),
        }

        const _: () = {
            #[allow(non_upper_case_globals)]
            extern "C" {
                static mut $ctrl: $crate::fsp::timer_ctrl_t;
                static $cfg: $crate::fsp::timer_cfg_t;
            }

            static mut TAKEN: bool = false;

            impl $crate::Peripheral for $name {
                fn take() -> Option<Self> {
                    $crate::__critical_section::with(|_| unsafe {
                        if TAKEN {
                            None
                        } else {
                            TAKEN = true;
                            Some(Self { _private: () })
                        }
                    })
                }

                unsafe fn steal() -> Self {
                    Self { _private: () }
                }
            }

            impl $crate::pwm::GptInstance for $name {
                fn ctrl(&self) -> *mut $crate::fsp::timer_ctrl_t {
                    unsafe { core::ptr::addr_of_mut!($ctrl) }
                }

                fn cfg(&self) -> &'static $crate::fsp::timer_cfg_t {
                    unsafe { &*core::ptr::addr_of!($cfg) }
                }
            }
        };
    };
}
