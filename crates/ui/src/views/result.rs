use crate::vm::ResultVm;

use super::banner;

#[must_use]
pub fn render_result(vm: &ResultVm) -> String {
    let mut out = vec![banner(&vm.title)];
    out.extend(vm.lines.iter().cloned());
    out.push(String::new());
    out.join("\n")
}
