#![doc = include_str!("../../../README.md")]

mod args;
mod block;
mod compile;
mod dispatch;
mod error;
mod expressions;
pub mod js;
mod options;
mod parse;
mod prepare;
mod resolve;
mod signature;

pub use crate::{
    compile::{CompiledModule, Compiler, compile_str},
    dispatch::NodeKind,
    error::{CodeLoc, CompileError, Location, Support},
    options::{CallConvention, CompileOptions},
    parse::CodeRange,
    resolve::{FsResolver, MemoryResolver, ModuleResolver, ModuleSource},
};
