// Subset of the `e_fsp_err` enumeration the UART driver can return

use crate::fsp_err_t;

pub const FSP_SUCCESS: fsp_err_t = 0;
pub const FSP_ERR_ASSERTION: fsp_err_t = 1;
pub const FSP_ERR_INVALID_POINTER: fsp_err_t = 2;
pub const FSP_ERR_INVALID_ARGUMENT: fsp_err_t = 3;
pub const FSP_ERR_INVALID_CHANNEL: fsp_err_t = 4;
pub const FSP_ERR_UNSUPPORTED: fsp_err_t = 6;
pub const FSP_ERR_NOT_OPEN: fsp_err_t = 7;
pub const FSP_ERR_IN_USE: fsp_err_t = 8;
pub const FSP_ERR_ALREADY_OPEN: fsp_err_t = 14;
pub const FSP_ERR_ABORTED: fsp_err_t = 18;
pub const FSP_ERR_TIMEOUT: fsp_err_t = 20;
pub const FSP_ERR_TRANSFER_ABORTED: fsp_err_t = 500;
