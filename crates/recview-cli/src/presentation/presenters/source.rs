use crate::presentation::view_models::SourceViewModel;
use recview_engine::ArenaRecord;
use recview_types::SourceCode;

pub fn build_source_view_model(call: &ArenaRecord, source: Option<&SourceCode>) -> SourceViewModel {
    let method_name = call.method.name.clone();
    SourceViewModel {
        call_id: call.id.0,
        type_name: call.method.declaring_type.clone(),
        file_name: source.and_then(|source| source.file_name.clone()),
        method_line: source.and_then(|source| source.line_of_method(&method_name)),
        text: source.map(|source| source.text.clone()),
        method_name,
    }
}
