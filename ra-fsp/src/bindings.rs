use core::ffi::c_void;

/// `fsp_err_t` from `fsp_common_api.h`.
pub type fsp_err_t = i32;

/// `uart_event_t` from `r_uart_api.h`. Each callback carries a single bit.
pub type uart_event_t = u32;

/// Arguments handed to the user callback registered for a UART channel.
#[repr(C)]
#[derive(Debug)]
pub struct uart_callback_args_t {
    pub channel: u32,
    pub event: uart_event_t,
    /// Received byte for `UART_EVENT_RX_CHAR`, otherwise unused.
    pub data: u32,
    pub p_context: *const c_void,
}

/// Driver control block (`sci_b_uart_instance_ctrl_t` / `sci_uart_instance_ctrl_t`).
/// Only ever handled by address.
#[repr(C)]
pub struct uart_ctrl_t {
    _private: [u8; 0],
}

/// Generated channel configuration (`uart_cfg_t`). Only ever handled by address.
#[repr(C)]
pub struct uart_cfg_t {
    _private: [u8; 0],
}

pub type uart_callback_t = unsafe extern "C" fn(p_args: *mut uart_callback_args_t);

extern "C" {
    #[cfg_attr(feature = "sci-b", link_name = "R_SCI_B_UART_Open")]
    #[cfg_attr(not(feature = "sci-b"), link_name = "R_SCI_UART_Open")]
    pub fn R_UART_Open(p_api_ctrl: *mut uart_ctrl_t, p_cfg: *const uart_cfg_t) -> fsp_err_t;

    #[cfg_attr(feature = "sci-b", link_name = "R_SCI_B_UART_Write")]
    #[cfg_attr(not(feature = "sci-b"), link_name = "R_SCI_UART_Write")]
    pub fn R_UART_Write(p_api_ctrl: *mut uart_ctrl_t, p_src: *const u8, bytes: u32) -> fsp_err_t;

    #[cfg_attr(feature = "sci-b", link_name = "R_SCI_B_UART_Close")]
    #[cfg_attr(not(feature = "sci-b"), link_name = "R_SCI_UART_Close")]
    pub fn R_UART_Close(p_api_ctrl: *mut uart_ctrl_t) -> fsp_err_t;

    #[cfg_attr(feature = "sci-b", link_name = "R_SCI_B_UART_CallbackSet")]
    #[cfg_attr(not(feature = "sci-b"), link_name = "R_SCI_UART_CallbackSet")]
    pub fn R_UART_CallbackSet(
        p_api_ctrl: *mut uart_ctrl_t,
        p_callback: Option<uart_callback_t>,
        p_context: *const c_void,
        p_callback_memory: *mut uart_callback_args_t,
    ) -> fsp_err_t;
}

extern "C" {
    /// Core clock in Hz, maintained by the BSP (CMSIS `SystemCoreClock`).
    pub static SystemCoreClock: u32;
}
