// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Built-in printer commands.
//
// Each entry in `CATALOGUE` names a runtime method, the argument layout it
// expects, and how its `args` map decodes into a typed `PrinterCommand`.
// Decoding failures surface before the SDK is touched.

use eposlink_core::Result;

use crate::decode::ArgShape;
use crate::params::{Params, WireEnum};

/// SDK sentinel for "use the default timeout".
pub const PARAM_DEFAULT: i32 = -2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Toggle {
    On,
    Off,
}

impl WireEnum for Toggle {
    const VARIANTS: &'static [(&'static str, Self)] = &[("ON", Self::On), ("OFF", Self::Off)];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Center,
    Right,
}

impl WireEnum for Align {
    const VARIANTS: &'static [(&'static str, Self)] = &[
        ("ALIGN_LEFT", Self::Left),
        ("ALIGN_CENTER", Self::Center),
        ("ALIGN_RIGHT", Self::Right),
    ];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CutType {
    /// Feed to the cutter, then cut.
    Feed,
    /// Cut at the current position.
    NoFeed,
    /// Cut once the next print reaches the cutter.
    Reserve,
}

impl WireEnum for CutType {
    const VARIANTS: &'static [(&'static str, Self)] = &[
        ("CUT_FEED", Self::Feed),
        ("CUT_NO_FEED", Self::NoFeed),
        ("CUT_RESERVE", Self::Reserve),
    ];
}

/// Cash drawer connector pin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Drawer {
    TwoPin,
    FivePin,
}

impl WireEnum for Drawer {
    const VARIANTS: &'static [(&'static str, Self)] = &[
        ("DRAWER_2PIN", Self::TwoPin),
        ("DRAWER_5PIN", Self::FivePin),
    ];
}

/// Drawer kick pulse width.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PulseTime {
    Ms100,
    Ms200,
    Ms300,
    Ms400,
    Ms500,
}

impl WireEnum for PulseTime {
    const VARIANTS: &'static [(&'static str, Self)] = &[
        ("PULSE_100", Self::Ms100),
        ("PULSE_200", Self::Ms200),
        ("PULSE_300", Self::Ms300),
        ("PULSE_400", Self::Ms400),
        ("PULSE_500", Self::Ms500),
    ];
}

/// A fully decoded native operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PrinterCommand {
    Connect { target: String, timeout: i32 },
    Disconnect,
    BeginTransaction,
    EndTransaction,
    ClearCommandBuffer,
    AddText { data: String },
    AddTextAlign { align: Align },
    AddTextSmooth { smooth: Toggle },
    AddFeedLine { line: i32 },
    AddCut { cut: CutType },
    AddPulse { drawer: Drawer, time: PulseTime },
    SendData { timeout: i32 },
    GetStatus,
}

impl PrinterCommand {
    /// Whether the command only appends to the printer's command buffer.
    pub fn is_buffered(&self) -> bool {
        matches!(
            self,
            Self::AddText { .. }
                | Self::AddTextAlign { .. }
                | Self::AddTextSmooth { .. }
                | Self::AddFeedLine { .. }
                | Self::AddCut { .. }
                | Self::AddPulse { .. }
        )
    }
}

/// One built-in runtime method.
pub struct CommandSpec {
    pub method: &'static str,
    pub shape: ArgShape,
    pub build: fn(&Params) -> Result<PrinterCommand>,
}

pub const CATALOGUE: &[CommandSpec] = &[
    CommandSpec { method: "connect", shape: ArgShape::IdWithArgs, build: connect },
    CommandSpec { method: "disconnect", shape: ArgShape::IdOnly, build: disconnect },
    CommandSpec { method: "beginTransaction", shape: ArgShape::IdOnly, build: begin_transaction },
    CommandSpec { method: "endTransaction", shape: ArgShape::IdOnly, build: end_transaction },
    CommandSpec { method: "clearCommandBuffer", shape: ArgShape::IdOnly, build: clear_command_buffer },
    CommandSpec { method: "addText", shape: ArgShape::IdWithArgs, build: add_text },
    CommandSpec { method: "addTextAlign", shape: ArgShape::IdWithArgs, build: add_text_align },
    CommandSpec { method: "addTextSmooth", shape: ArgShape::IdWithArgs, build: add_text_smooth },
    CommandSpec { method: "addFeedLine", shape: ArgShape::IdWithArgs, build: add_feed_line },
    CommandSpec { method: "addCut", shape: ArgShape::IdWithArgs, build: add_cut },
    CommandSpec { method: "addPulse", shape: ArgShape::IdWithArgs, build: add_pulse },
    CommandSpec { method: "sendData", shape: ArgShape::IdWithArgs, build: send_data },
    CommandSpec { method: "getStatus", shape: ArgShape::IdOnly, build: get_status },
];

/// Look up a built-in method by name.
pub fn find(method: &str) -> Option<&'static CommandSpec> {
    CATALOGUE.iter().find(|spec| spec.method == method)
}

fn disconnect(_: &Params) -> Result<PrinterCommand> {
    Ok(PrinterCommand::Disconnect)
}

fn begin_transaction(_: &Params) -> Result<PrinterCommand> {
    Ok(PrinterCommand::BeginTransaction)
}

fn end_transaction(_: &Params) -> Result<PrinterCommand> {
    Ok(PrinterCommand::EndTransaction)
}

fn clear_command_buffer(_: &Params) -> Result<PrinterCommand> {
    Ok(PrinterCommand::ClearCommandBuffer)
}

fn get_status(_: &Params) -> Result<PrinterCommand> {
    Ok(PrinterCommand::GetStatus)
}

fn connect(p: &Params) -> Result<PrinterCommand> {
    Ok(PrinterCommand::Connect {
        target: p.str("target")?.to_owned(),
        timeout: p.opt_i32("timeout")?.unwrap_or(PARAM_DEFAULT),
    })
}

fn add_text(p: &Params) -> Result<PrinterCommand> {
    Ok(PrinterCommand::AddText {
        data: p.str("data")?.to_owned(),
    })
}

fn add_text_align(p: &Params) -> Result<PrinterCommand> {
    Ok(PrinterCommand::AddTextAlign {
        align: p.enumeration("align")?,
    })
}

fn add_text_smooth(p: &Params) -> Result<PrinterCommand> {
    Ok(PrinterCommand::AddTextSmooth {
        smooth: p.enumeration("smooth")?,
    })
}

fn add_feed_line(p: &Params) -> Result<PrinterCommand> {
    Ok(PrinterCommand::AddFeedLine { line: p.i32("line")? })
}

fn add_cut(p: &Params) -> Result<PrinterCommand> {
    Ok(PrinterCommand::AddCut {
        cut: p.enumeration("type")?,
    })
}

fn add_pulse(p: &Params) -> Result<PrinterCommand> {
    Ok(PrinterCommand::AddPulse {
        drawer: p.enumeration("drawer")?,
        time: p.enumeration("time")?,
    })
}

fn send_data(p: &Params) -> Result<PrinterCommand> {
    Ok(PrinterCommand::SendData {
        timeout: p.opt_i32("timeout")?.unwrap_or(PARAM_DEFAULT),
    })
}
