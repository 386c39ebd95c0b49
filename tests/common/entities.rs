use dog_search::Dog;

pub fn dog(id: &str, breed: &str, name: &str, age: u32, zip_code: &str) -> Dog {
    Dog {
        id: id.to_string(),
        breed: breed.to_string(),
        name: name.to_string(),
        age,
        zip_code: zip_code.to_string(),
        image_link: format!("https://frontend-take-home.fetch.com/dog-images/{id}.jpg"),
    }
}

pub fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

/// Twelve dogs over four breeds and four zip codes, ages 0 to 14
pub fn sample_dogs() -> Vec<Dog> {
    vec![
        dog("qcD-OZUBBPFf4ZNZzDCC", "Affenpinscher", "Brionna", 14, "06519"),
        dog("rcD-OZUBBPFf4ZNZzDCC", "Affenpinscher", "Kaia", 3, "10001"),
        dog("s8D-OZUBBPFf4ZNZzA1l", "Akita", "Moose", 7, "10001"),
        dog("tMD-OZUBBPFf4ZNZzA1l", "Akita", "Juno", 0, "12345"),
        dog("tcD-OZUBBPFf4ZNZzA1l", "Akita", "Odin", 11, "06519"),
        dog("ucD-OZUBBPFf4ZNZzA1l", "Doberman", "Rex", 5, "12345"),
        dog("vMD-OZUBBPFf4ZNZzA1l", "Doberman", "Zeus", 9, "10001"),
        dog("n8D-OZUBBPFf4ZNZzCt-", "Doberman", "Bella", 2, "54321"),
        dog("gcD-OZUBBPFf4ZNZzAli", "Poodle", "Coco", 4, "12345"),
        dog("G8D-OZUBBPFf4ZNZzBxx", "Poodle", "Daisy", 6, "54321"),
        dog("Wr_-OZUBBPFf4ZNZzPJO", "Poodle", "Lola", 1, "10001"),
        dog("xMD-OZUBBPFf4ZNZzCp9", "Poodle", "Milo", 12, "06519"),
    ]
}
