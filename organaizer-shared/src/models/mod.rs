// SPDX-License-Identifier: GPL-3.0-only
pub mod action;
pub mod api;
pub mod image;
pub mod notification;
pub mod settings;
