//! 页面数据状态

mod modal;

pub use modal::{DeleteTarget, Modal, ModalState, PairField};
