// GPT timer API from r_timer_api.h / r_gpt.h, only what PWM output needs

use crate::fsp_err_t;

/// `gpt_io_pin_t`
pub const GPT_IO_PIN_GTIOCA: u32 = 0;
pub const GPT_IO_PIN_GTIOCB: u32 = 1;

/// Timer control block (`gpt_instance_ctrl_t`). Only ever handled by address.
#[repr(C)]
pub struct timer_ctrl_t {
    _private: [u8; 0],
}

/// Generated timer configuration (`timer_cfg_t`). Only ever handled by address.
#[repr(C)]
pub struct timer_cfg_t {
    _private: [u8; 0],
}

#[repr(C)]
#[derive(Debug, Default, Clone, Copy)]
pub struct timer_info_t {
    /// `timer_direction_t`
    pub count_direction: u32,
    pub clock_frequency: u32,
    pub period_counts: u32,
}

extern "C" {
    pub fn R_GPT_Open(p_ctrl: *mut timer_ctrl_t, p_cfg: *const timer_cfg_t) -> fsp_err_t;
    pub fn R_GPT_Start(p_ctrl: *mut timer_ctrl_t) -> fsp_err_t;
    pub fn R_GPT_InfoGet(p_ctrl: *mut timer_ctrl_t, p_info: *mut timer_info_t) -> fsp_err_t;
    pub fn R_GPT_DutyCycleSet(p_ctrl: *mut timer_ctrl_t, duty_cycle_counts: u32, pin: u32) -> fsp_err_t;
}
