//! Wire rendering for store documents.
//!
//! Store-assigned ObjectIds serialize to extended JSON (`{"$oid": "..."}`)
//! by default, but clients expect the plain hex form. These helpers flatten
//! identifiers to strings right before a response body is built.

use handyhub_store::{Bson, Document};

/// Plain-string form of a store-assigned identifier.
pub fn id_string(id: &Bson) -> String {
    match id {
        Bson::ObjectId(oid) => oid.to_hex(),
        Bson::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Flatten a document's `_id` to its plain string form.
pub fn render_document(mut document: Document) -> Document {
    if let Some(Bson::ObjectId(oid)) = document.get("_id") {
        let id = oid.to_hex();
        document.insert("_id", id);
    }
    document
}

/// Render a whole result set for a listing response.
pub fn render_documents(documents: Vec<Document>) -> Vec<Document> {
    documents.into_iter().map(render_document).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use handyhub_store::{doc, oid::ObjectId};

    #[test]
    fn object_ids_render_as_their_hex_form() {
        let oid = ObjectId::new();
        assert_eq!(id_string(&Bson::ObjectId(oid)), oid.to_hex());
    }

    #[test]
    fn string_ids_pass_through_untouched() {
        assert_eq!(id_string(&Bson::String("custom-id".into())), "custom-id");
    }

    #[test]
    fn document_id_field_becomes_a_plain_string() {
        let oid = ObjectId::new();
        let document = doc! { "_id": oid, "isbn": "111" };

        let rendered = render_document(document);
        assert_eq!(rendered.get_str("_id").unwrap(), oid.to_hex());
        assert_eq!(rendered.get_str("isbn").unwrap(), "111");
    }

    #[test]
    fn documents_without_an_id_are_left_alone() {
        let document = doc! { "isbn": "111" };
        let rendered = render_document(document.clone());
        assert_eq!(rendered, document);
    }
}
