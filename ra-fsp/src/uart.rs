// UART constants from r_uart_api.h

use crate::uart_event_t;

/***************************************************************************/
/**
 UART Events
 ===========
 Passed to the user callback in `uart_callback_args_t::event`.

 | Constant                   | Description                              |
 |----------------------------|------------------------------------------|
 | UART_EVENT_RX_COMPLETE     | Receive of a requested length finished   |
 | UART_EVENT_TX_COMPLETE     | Last byte of a write left the shifter    |
 | UART_EVENT_RX_CHAR         | Byte received outside a read request     |
 | UART_EVENT_ERR_PARITY      | Parity error                             |
 | UART_EVENT_ERR_FRAMING     | Framing error                            |
 | UART_EVENT_ERR_OVERFLOW    | Receive overrun                          |
 | UART_EVENT_BREAK_DETECT    | Break condition on the line              |
 | UART_EVENT_TX_DATA_EMPTY   | Transmit data register empty             |

*/
pub const UART_EVENT_RX_COMPLETE: uart_event_t = 1 << 0;
pub const UART_EVENT_TX_COMPLETE: uart_event_t = 1 << 1;
pub const UART_EVENT_RX_CHAR: uart_event_t = 1 << 2;
pub const UART_EVENT_ERR_PARITY: uart_event_t = 1 << 3;
pub const UART_EVENT_ERR_FRAMING: uart_event_t = 1 << 4;
pub const UART_EVENT_ERR_OVERFLOW: uart_event_t = 1 << 5;
pub const UART_EVENT_BREAK_DETECT: uart_event_t = 1 << 6;
pub const UART_EVENT_TX_DATA_EMPTY: uart_event_t = 1 << 7;
