//! Add/edit form schemas for each resource.

use super::schema::FieldSpec;
use super::schema::FormSchema;
use crate::model::Resource;

/// Returns the form schema for a resource, or `None` for read-only inboxes.
pub fn schema_for(resource: Resource) -> Option<FormSchema> {
    let schema = FormSchema::new(resource);
    let schema = match resource {
        Resource::BannerImages => schema
            .field(FieldSpec::file("image", "Image").required_on_create("Please upload an image."))
            .field(FieldSpec::text("altText", "Alt text")),
        Resource::BannerPointers => schema
            .field(FieldSpec::text("pointer1", "Pointer 1").required("Please add pointer."))
            .field(FieldSpec::text("pointer1Detail", "Pointer 1 detail"))
            .field(FieldSpec::text("pointer2", "Pointer 2").required("Please add a pointer 2."))
            .field(FieldSpec::text("pointer2Detail", "Pointer 2 detail"))
            .field(FieldSpec::text("pointer3", "Pointer 3").required("Please add pointer 3."))
            .field(FieldSpec::text("pointer3Detail", "Pointer 3 detail"))
            .field(FieldSpec::text("pointer4", "Pointer 4").required("Please add a pointer 4."))
            .field(FieldSpec::text("pointer4Detail", "Pointer 4 detail")),
        Resource::Projects => schema
            .field(FieldSpec::text("projectName", "Project name").required("Project Name is required."))
            .field(
                FieldSpec::number_list("areas", "Areas")
                    .required("All area fields must have valid numeric values."),
            )
            .field(FieldSpec::text("altText", "Alt text").required("Alt Text is required."))
            .field(FieldSpec::text("workBy", "Work by").required("Work By is required."))
            .field(
                FieldSpec::text_list("locations", "Locations")
                    .required("All location fields must have valid values."),
            )
            .field(FieldSpec::text("category", "Category").required("Category is required."))
            .field(FieldSpec::file("image", "Image").required_on_create("Image is required.")),
        Resource::Clients => schema
            .field(FieldSpec::text("altText", "Alt text").required("Alternate text is required."))
            .field(FieldSpec::file("image", "Logo").required_on_create("Image is required.")),
        Resource::Overview => schema
            .field(FieldSpec::text("area", "Area").required("Please add a area."))
            .field(
                FieldSpec::text("deliveredProjects", "Delivered projects")
                    .required("Please add a delivered Projects."),
            )
            .field(
                FieldSpec::text("happyCustomers", "Happy customers")
                    .required("Please add happy Customers."),
            )
            .field(FieldSpec::text("content", "Content").required("Please add a content.")),
        Resource::Awards => schema
            .field(FieldSpec::file("image", "Image").required_on_create("Please upload an image."))
            .field(FieldSpec::file("certificateImage", "Certificate"))
            .field(FieldSpec::text("altText", "Alt text").required("Alternate text is required.")),
        Resource::Testimonials => schema
            .field(FieldSpec::file("logo", "Logo").required_on_create("Logo is required"))
            .field(FieldSpec::file("image", "Image").required_on_create("Image is required"))
            .field(
                FieldSpec::text("logoAltText", "Logo alt text")
                    .required("Logo Alt Text is required"),
            )
            .field(
                FieldSpec::text("imageAltText", "Image alt text")
                    .required("Image Alt Text is required"),
            )
            .field(FieldSpec::text("content", "Content").required("Content is required")),
        Resource::Careers => schema
            .field(FieldSpec::text("role", "Role").required("Please add a role."))
            .field(FieldSpec::text("position", "Position").required("Please add a position."))
            .field(FieldSpec::text("experience", "Experience").required("Please add experience."))
            .field(FieldSpec::text("location", "Location").required("Please add a location."))
            .field(
                FieldSpec::text("description", "Description").required("Please add a description."),
            ),
        Resource::Gallery => schema
            .field(FieldSpec::text("projectName", "Project name").required("Project name is required."))
            .field(FieldSpec::text("location", "Location").required("Location is required."))
            .field(FieldSpec::number("priority", "Priority").required("Priority is required."))
            .field(FieldSpec::text("metaTitle", "Meta title"))
            .field(FieldSpec::text("metaKeywords", "Meta keywords"))
            .field(FieldSpec::text("metaDescription", "Meta description"))
            .field(FieldSpec::file("image", "Cover image").required_on_create("Please upload an image.")),
        Resource::GalleryImages => schema
            .field(FieldSpec::text("projectId", "Gallery"))
            .field(FieldSpec::files("images", "Images").required("Please upload at least one image.")),
        Resource::Spotlights => schema
            .field(
                FieldSpec::file("imageUpload", "Image").required_on_create("Please upload an image."),
            )
            .field(
                FieldSpec::text("spotlightheading", "Heading")
                    .required("Spotlight heading is required."),
            )
            .field(
                FieldSpec::text("spotlightcontent", "Content")
                    .required("Spotlight content is required."),
            )
            .field(FieldSpec::text("spotlightPointer1", "Pointer 1").required("Pointer 1 is required."))
            .field(FieldSpec::text("spotlightPointer2", "Pointer 2").required("Pointer 2 is required."))
            .field(FieldSpec::text("spotlightPointer3", "Pointer 3").required("Pointer 3 is required.")),
        Resource::ContactQueries | Resource::CareerQueries => return None,
    };
    Some(schema)
}
